use huecheck_rendering_macroquad::AnswerPanelInputState;

fn run_option_sequence(sequence: &[Option<usize>]) -> Vec<Option<usize>> {
    let mut state = AnswerPanelInputState::default();
    let mut selections = Vec::new();
    for &clicked in sequence {
        selections.push(state.take().selected_option);
        if let Some(option) = clicked {
            state.register_option(option);
        }
    }

    // Flush any trailing latched click so the harness observes the final selection.
    selections.push(state.take().selected_option);
    selections
}

fn run_next_sequence(sequence: &[bool]) -> Vec<bool> {
    let mut state = AnswerPanelInputState::default();
    let mut presses = Vec::new();
    for &pressed in sequence {
        presses.push(state.take().next);
        if pressed {
            state.register_next();
        }
    }
    presses.push(state.take().next);
    presses
}

#[test]
fn option_clicks_replay_one_frame_later() {
    let clicks = [None, Some(2), None, Some(0), Some(3), None];
    let expected = vec![None, None, Some(2), None, Some(0), Some(3), None];

    let first_run = run_option_sequence(&clicks);
    let second_run = run_option_sequence(&clicks);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn next_button_sequence_is_deterministic() {
    let button_sequence = [true, false, true, false, false, true];
    let expected = vec![false, true, false, true, false, false, true];

    let first_run = run_next_sequence(&button_sequence);
    let second_run = run_next_sequence(&button_sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn taking_clears_every_latch() {
    let mut state = AnswerPanelInputState::default();
    state.register_option(1);
    state.register_previous();
    state.register_restart();

    let frame = state.take();
    assert_eq!(frame.selected_option, Some(1));
    assert!(frame.previous && frame.restart && !frame.next);
    assert!(state.take().is_idle());
}
