use fingering_core::{analyze, Difficulty, Hand, Note, PatternType};

fn notes(pitches: &[u8], hand: Hand) -> Vec<Note> {
    pitches.iter().map(|&p| Note::new(p, 1.0, hand)).collect()
}

#[test]
fn ascending_octave_scale_is_recognized_and_fingered() {
    let stream = notes(&[60, 62, 64, 65, 67, 69, 71, 72], Hand::Right);
    let result = analyze(&stream, Difficulty::Intermediate);
    assert_eq!(result.fingering.len(), 8);
    assert!(result
        .segments
        .iter()
        .any(|s| s.pattern_type == PatternType::Scale));
    assert_eq!(result.fingering[0].finger, 1);
}

#[test]
fn descending_octave_scale_starts_on_pinky() {
    let stream = notes(&[72, 71, 69, 67, 65, 64, 62, 60], Hand::Right);
    let result = analyze(&stream, Difficulty::Intermediate);
    assert!(result
        .segments
        .iter()
        .any(|s| s.pattern_type == PatternType::Scale));
    assert_eq!(result.fingering[0].finger, 5);
}

#[test]
fn wide_arpeggio_is_recognized() {
    let stream = notes(&[60, 76, 91], Hand::Right);
    let result = analyze(&stream, Difficulty::Advanced);
    assert!(result
        .segments
        .iter()
        .any(|s| s.pattern_type == PatternType::Arpeggio));
    assert_eq!(result.fingering.len(), 3);
}

#[test]
fn broken_triad_spanning_three_octaves_is_recognized_as_arpeggio() {
    // Intervals [4,3,5,4,3,5]: every step is a third or fourth, so none
    // qualify as a "leap" under the strict >4-semitone cutoff, yet none
    // are stepwise either. The broken-chord shape still wins.
    let stream = notes(&[60, 64, 67, 72, 76, 79, 84], Hand::Right);
    let result = analyze(&stream, Difficulty::Advanced);
    assert!(result
        .segments
        .iter()
        .any(|s| s.pattern_type == PatternType::Arpeggio));
    assert_eq!(result.fingering.len(), 7);
}

#[test]
fn repeated_note_alternates_fingers() {
    let stream = notes(&[60, 60, 60, 60, 60], Hand::Right);
    let result = analyze(&stream, Difficulty::Beginner);
    assert!(result
        .segments
        .iter()
        .any(|s| s.pattern_type == PatternType::Repeated));
    for pair in result.fingering.windows(2) {
        assert_ne!(pair[0].finger, pair[1].finger);
    }
}

#[test]
fn alberti_bass_in_left_hand_is_recognized() {
    let stream = notes(&[48, 55, 52, 55, 48, 55, 52, 55, 48, 55, 52, 55], Hand::Left);
    let result = analyze(&stream, Difficulty::Intermediate);
    assert!(result
        .segments
        .iter()
        .any(|s| s.pattern_type == PatternType::Alberti));
}

#[test]
fn trill_ornament_is_recognized() {
    let mut stream = notes(&[64, 65], Hand::Right);
    stream[0].flags.has_trill = true;
    stream[1].flags.has_trill = true;
    let result = analyze(&stream, Difficulty::Intermediate);
    assert!(result
        .segments
        .iter()
        .any(|s| s.pattern_type == PatternType::Ornamented));
}

#[test]
fn empty_input_yields_empty_output() {
    let result = analyze(&[], Difficulty::Intermediate);
    assert!(result.fingering.is_empty());
    assert!(result.segments.is_empty());
}

#[test]
fn single_note_input_is_fingered() {
    let stream = notes(&[60], Hand::Right);
    let result = analyze(&stream, Difficulty::Intermediate);
    assert_eq!(result.fingering.len(), 1);
    assert!((1..=5).contains(&result.fingering[0].finger));
}

#[test]
fn output_order_matches_input_order_across_both_hands() {
    let stream: Vec<Note> = [60u8, 48, 62, 50, 64, 52]
        .into_iter()
        .enumerate()
        .map(|(i, p)| Note::new(p, 1.0, if i % 2 == 0 { Hand::Right } else { Hand::Left }))
        .collect();
    let result = analyze(&stream, Difficulty::Intermediate);
    assert_eq!(result.fingering.len(), stream.len());
    for (i, assignment) in result.fingering.iter().enumerate() {
        assert_eq!(assignment.index, i);
    }
}

#[test]
fn chunking_boundary_produces_full_length_plan() {
    let pitches: Vec<u8> = (0..70).map(|i| 60 + (i % 12) as u8).collect();
    let stream = notes(&pitches, Hand::Right);
    let result = analyze(&stream, Difficulty::Intermediate);
    assert_eq!(result.fingering.len(), 70);
}

#[test]
fn repeated_analysis_is_deterministic() {
    let stream = notes(&[60, 64, 67, 72, 76, 79, 84], Hand::Right);
    let a = analyze(&stream, Difficulty::Advanced);
    let b = analyze(&stream, Difficulty::Advanced);
    assert_eq!(a, b);
}
