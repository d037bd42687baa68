use huecheck_assessment::{self as assessment, query, AssessmentSession};
use huecheck_core::{Command, DisplayMode, DrawingSurface, Event};
use huecheck_rendering::{FontRasterizer, FrameInput, PlateScene};
use huecheck_system_classification::Classifier;
use huecheck_system_plate_rendering::PlateRenderer;

/// Wires the assessment session to the classifier and the plate renderer.
#[derive(Debug)]
pub(crate) struct AssessmentDriver {
    session: AssessmentSession,
    classifier: Classifier,
    renderer: PlateRenderer,
    rasterizer: FontRasterizer,
    active_mode: DisplayMode,
}

impl AssessmentDriver {
    pub(crate) fn new(
        renderer: PlateRenderer,
        rasterizer: FontRasterizer,
        active_mode: DisplayMode,
    ) -> Self {
        Self {
            session: AssessmentSession::new(),
            classifier: Classifier::new(),
            renderer,
            rasterizer,
            active_mode,
        }
    }

    /// Opens the first plate.
    pub(crate) fn start(&mut self) -> Vec<Event> {
        self.dispatch(Command::Restart)
    }

    /// Applies `command` and returns the session events followed by any verdict.
    pub(crate) fn dispatch(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        assessment::apply(&mut self.session, command, &mut events);
        let mut verdicts = Vec::new();
        self.classifier.handle(
            &events,
            query::plates(&self.session),
            query::answers(&self.session),
            self.active_mode,
            &mut verdicts,
        );
        events.extend(verdicts);
        events
    }

    /// Draws every plate entered in `events` onto `surface`.
    pub(crate) fn render<S>(&self, events: &[Event], surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        self.renderer.handle(
            events,
            query::plates(&self.session),
            &self.rasterizer,
            surface,
        );
    }

    pub(crate) fn session(&self) -> &AssessmentSession {
        &self.session
    }

    /// Copies the session's headings and answers into `scene`.
    pub(crate) fn sync_scene(&self, scene: &mut PlateScene) {
        scene.progress = query::progress(&self.session);
        match query::current_plate(&self.session) {
            Some(plate) => {
                scene.title = plate.label().to_owned();
                scene.options = plate.options().iter().map(|option| (*option).to_owned()).collect();
                scene.selected = query::current_choice(&self.session);
            }
            None => {
                scene.title = "Assessment complete".to_owned();
                scene.options.clear();
                scene.selected = None;
            }
        }
    }
}

/// Session commands requested by one frame of window input.
///
/// A restart discards every other request of the frame.
pub(crate) fn commands_for(input: FrameInput) -> Vec<Command> {
    if input.restart {
        return vec![Command::Restart];
    }
    let mut commands = Vec::new();
    if let Some(option) = input.selected_option {
        commands.push(Command::SelectOption { option });
    }
    if input.previous {
        commands.push(Command::PreviousPlate);
    }
    if input.next {
        commands.push(Command::NextPlate);
    }
    commands
}

/// Learner-facing message for `event`, if it warrants one.
pub(crate) fn status_message(event: &Event) -> Option<String> {
    match event {
        Event::AnswerMissing { .. } => Some("Choose an answer before continuing.".to_owned()),
        Event::OptionRejected { option, .. } => {
            Some(format!("Option {} is not available.", option + 1))
        }
        Event::VerdictReady { verdict } => Some(format!("{}. {}", verdict.label(), verdict.hint())),
        Event::PlateEntered { .. } | Event::AnswerRecorded { .. } | Event::AssessmentCompleted => {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huecheck_core::{DeficiencyType, Rgb, Verdict};
    use huecheck_rendering::Color;
    use huecheck_system_plate_rendering::{PlateGeometry, RenderConfig};

    fn driver() -> AssessmentDriver {
        let renderer = PlateRenderer::new(PlateGeometry::default(), RenderConfig::new(64, 3.0, 7.0));
        let rasterizer = FontRasterizer::bundled().expect("bundled fonts parse");
        AssessmentDriver::new(renderer, rasterizer, DisplayMode::Normal)
    }

    #[test]
    fn restart_overrides_other_requests() {
        let input = FrameInput {
            selected_option: Some(1),
            next: true,
            previous: false,
            restart: true,
        };
        assert_eq!(commands_for(input), vec![Command::Restart]);
    }

    #[test]
    fn selection_is_applied_before_moving_on() {
        let input = FrameInput {
            selected_option: Some(2),
            next: true,
            ..FrameInput::default()
        };
        assert_eq!(
            commands_for(input),
            vec![Command::SelectOption { option: 2 }, Command::NextPlate]
        );
        assert!(commands_for(FrameInput::default()).is_empty());
    }

    #[test]
    fn start_renders_the_first_plate_into_the_scene() {
        let mut driver = driver();
        let mut scene = PlateScene::new(360, 360, Color::from(Rgb::WHITE));

        let events = driver.start();
        driver.render(&events, &mut scene);
        driver.sync_scene(&mut scene);

        assert_eq!(scene.dots.len(), 64);
        assert!(scene.border.is_some());
        assert_eq!(scene.title, "Plate 1 (control)");
        assert_eq!(scene.progress, (1, 8));
        assert_eq!(scene.options.len(), 4);
        assert_eq!(scene.selected, None);
    }

    #[test]
    fn finishing_every_plate_yields_a_verdict() {
        let mut driver = driver();
        let _ = driver.start();
        for _ in 0..7 {
            let _ = driver.dispatch(Command::SelectOption { option: 0 });
            let _ = driver.dispatch(Command::NextPlate);
        }
        let _ = driver.dispatch(Command::SelectOption { option: 0 });
        let last = driver.dispatch(Command::NextPlate);

        let verdict = Verdict::new(DeficiencyType::Normal, DisplayMode::Normal);
        assert_eq!(
            last,
            vec![Event::AssessmentCompleted, Event::VerdictReady { verdict }]
        );
        assert!(query::is_completed(driver.session()));

        let mut scene = PlateScene::new(360, 360, Color::from(Rgb::WHITE));
        driver.sync_scene(&mut scene);
        assert_eq!(scene.title, "Assessment complete");
        assert!(scene.options.is_empty());
    }

    #[test]
    fn status_messages_cover_prompts_and_verdicts() {
        assert_eq!(
            status_message(&Event::AnswerMissing { index: 0 }).as_deref(),
            Some("Choose an answer before continuing.")
        );
        assert_eq!(
            status_message(&Event::OptionRejected { index: 0, option: 6 }).as_deref(),
            Some("Option 7 is not available.")
        );
        let verdict = Verdict::new(DeficiencyType::Tritanopia, DisplayMode::Tritanopia);
        let message = status_message(&Event::VerdictReady { verdict }).expect("verdict message");
        assert!(message.starts_with("Tritanopia. "));
        assert_eq!(status_message(&Event::AssessmentCompleted), None);
    }
}
