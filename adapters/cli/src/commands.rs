//! Subcommand implementations.

use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use anyhow::{bail, Context, Result};
use huecheck_assessment::{find_standard_plate, query, STANDARD_PLATES};
use huecheck_core::{
    detected_deficiency, display_mode, save_verdict, set_display_mode, AnswerRecord, AxisSelection,
    Command as SessionCommand, DisplayMode, Event, Hsl, Verdict,
};
use huecheck_rendering::{
    Color, FontRasterizer, PlateScene, Presentation, RenderingBackend, SvgSurface,
};
use huecheck_rendering_macroquad::MacroquadBackend;
use huecheck_system_classification::classify;
use huecheck_system_color_pairs::{effective_delta, generate, generate_random};
use huecheck_system_plate_rendering::{PlateRenderer, PlateSpec};
use huecheck_system_training::TrainingSession;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use crate::{
    cli::{AssessArgs, ClassifyArgs, Cli, Command, ModeArgs, PairArgs, RenderArgs, TrainArgs},
    driver::{commands_for, status_message, AssessmentDriver},
    preferences::FilePreferences,
    settings::Settings,
    transcript::SessionTranscript,
};

/// Dispatches the parsed command line.
pub(crate) fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    match &cli.command {
        Command::Assess(args) => run_assess(&settings, args),
        Command::Render(args) => run_render(&settings, args),
        Command::Classify(args) => run_classify(&settings, args),
        Command::Pair(args) => run_pair(&settings, args),
        Command::Train(args) => run_train(&settings, args),
        Command::Mode(args) => run_mode(&settings, args),
    }
}

fn run_assess(settings: &Settings, args: &AssessArgs) -> Result<()> {
    let preferences = FilePreferences::load(&settings.preferences)?;
    let active_mode = display_mode(&preferences);
    let renderer = PlateRenderer::new(settings.geometry(), settings.render_config());
    let driver = AssessmentDriver::new(renderer, FontRasterizer::bundled()?, active_mode);
    if args.window {
        run_assess_window(settings, driver, preferences, active_mode, args.save)
    } else {
        run_assess_terminal(settings, driver, preferences, args)
    }
}

fn run_assess_terminal(
    settings: &Settings,
    mut driver: AssessmentDriver,
    mut preferences: FilePreferences,
    args: &AssessArgs,
) -> Result<()> {
    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }
    println!("Type the number of the option you see, then press Enter.");
    println!("Commands: n (next), p (previous), r (restart), q (quit).");

    let mut events = driver.start();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let mut verdict = None;
        for event in &events {
            match event {
                Event::PlateEntered { .. } => {
                    if let Some(dir) = &args.out_dir {
                        write_plate_svg(settings, &driver, event, dir)?;
                    }
                    print_plate_prompt(&driver);
                }
                Event::VerdictReady { verdict: ready } => verdict = Some(*ready),
                _ => {}
            }
            if let Some(message) = status_message(event) {
                println!("{message}");
            }
        }

        if let Some(verdict) = verdict {
            let answers = query::answers(driver.session());
            println!("Transcript: {}", SessionTranscript::from_answers(answers).encode()?);
            if args.save {
                persist_verdict(&mut preferences, &verdict)?;
            }
            return Ok(());
        }

        prompt("> ")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read from stdin")?;
        events = match line.trim() {
            "q" | "quit" => return Ok(()),
            "n" | "next" | "" => driver.dispatch(SessionCommand::NextPlate),
            "p" | "previous" => driver.dispatch(SessionCommand::PreviousPlate),
            "r" | "restart" => driver.dispatch(SessionCommand::Restart),
            raw => match raw.parse::<usize>() {
                Ok(choice) if choice >= 1 => {
                    let mut events =
                        driver.dispatch(SessionCommand::SelectOption { option: choice - 1 });
                    if events
                        .iter()
                        .any(|event| matches!(event, Event::AnswerRecorded { .. }))
                    {
                        events.extend(driver.dispatch(SessionCommand::NextPlate));
                    }
                    events
                }
                _ => {
                    println!("Enter an option number or one of n, p, r, q.");
                    Vec::new()
                }
            },
        };
    }
}

fn print_plate_prompt(driver: &AssessmentDriver) {
    let Some(plate) = query::current_plate(driver.session()) else {
        return;
    };
    let (position, total) = query::progress(driver.session());
    println!();
    println!("{} ({position}/{total})", plate.label());
    for (index, option) in plate.options().iter().enumerate() {
        let marker = if query::current_choice(driver.session()) == Some(index) {
            '*'
        } else {
            ' '
        };
        println!(" {marker} {}. {option}", index + 1);
    }
}

fn write_plate_svg(
    settings: &Settings,
    driver: &AssessmentDriver,
    event: &Event,
    dir: &Path,
) -> Result<()> {
    let Event::PlateEntered { index, .. } = *event else {
        return Ok(());
    };
    let Some(plate) = query::plates(driver.session()).get(index) else {
        return Ok(());
    };
    let mut surface = SvgSurface::new(settings.canvas_width, settings.canvas_height);
    driver.render(std::slice::from_ref(event), &mut surface);
    let path = dir.join(format!("{:02}-{}.svg", index + 1, plate.id()));
    fs::write(&path, surface.finish())
        .with_context(|| format!("failed to write plate to {}", path.display()))?;
    println!("(plate written to {})", path.display());
    Ok(())
}

fn run_assess_window(
    settings: &Settings,
    mut driver: AssessmentDriver,
    mut preferences: FilePreferences,
    active_mode: DisplayMode,
    save: bool,
) -> Result<()> {
    let mut scene = PlateScene::new(
        settings.canvas_width,
        settings.canvas_height,
        Color::from(active_mode.accent()),
    );
    let events = driver.start();
    driver.render(&events, &mut scene);
    driver.sync_scene(&mut scene);

    let presentation = Presentation::new("huecheck", Color::from_rgb_u8(18, 18, 22), scene);
    MacroquadBackend::new()
        .with_vsync(true)
        .run(presentation, move |input, scene| {
            for command in commands_for(input) {
                let events = driver.dispatch(command);
                driver.render(&events, scene);
                for event in &events {
                    match event {
                        Event::PlateEntered { .. } | Event::AnswerRecorded { .. } => {
                            scene.banner = None;
                        }
                        Event::VerdictReady { verdict } if save => {
                            if let Err(error) = persist_verdict(&mut preferences, verdict) {
                                error!(error = %format!("{error:#}"), "failed to save verdict");
                            }
                        }
                        _ => {}
                    }
                    if let Some(message) = status_message(event) {
                        scene.banner = Some(message);
                    }
                }
            }
            driver.sync_scene(scene);
        })
}

fn persist_verdict(preferences: &mut FilePreferences, verdict: &Verdict) -> Result<()> {
    save_verdict(preferences, verdict);
    let _ = preferences.save()?;
    info!(
        path = %preferences.path().display(),
        category = verdict.category.as_str(),
        mode = verdict.recommended_mode.as_str(),
        "verdict saved"
    );
    println!(
        "Saved. Display mode is now {}.",
        verdict.recommended_mode.label()
    );
    Ok(())
}

fn run_render(settings: &Settings, args: &RenderArgs) -> Result<()> {
    let Some((index, plate)) = find_standard_plate(args.plate.trim()) else {
        let known: Vec<&str> = STANDARD_PLATES.iter().map(|plate| plate.id()).collect();
        bail!(
            "unknown plate `{}`; expected one of {}",
            args.plate,
            known.join(", ")
        );
    };
    let renderer = PlateRenderer::new(settings.geometry(), settings.render_config());
    let spec = PlateSpec::from_plate(&plate, index);
    let composition = renderer.compose(&spec, &FontRasterizer::bundled()?);

    match &args.out {
        Some(path) => {
            let mut surface = SvgSurface::new(settings.canvas_width, settings.canvas_height);
            composition.draw(&mut surface);
            fs::write(path, surface.finish())
                .with_context(|| format!("failed to write plate to {}", path.display()))?;
            println!("{} written to {}", plate.id(), path.display());
        }
        None => {
            println!(
                "{} hides \"{}\": {} dots, seed {:#010x}, fingerprint {:016x}",
                plate.id(),
                plate.target(),
                composition.dots().len(),
                spec.seed().get(),
                composition.fingerprint()
            );
        }
    }
    Ok(())
}

fn run_classify(settings: &Settings, args: &ClassifyArgs) -> Result<()> {
    let transcript = match (&args.answers, &args.transcript) {
        (Some(answers), _) => SessionTranscript::from_answers(&parse_answers(answers)?),
        (None, Some(transcript)) => SessionTranscript::decode(transcript)?,
        (None, None) => bail!("either --answers or --transcript is required"),
    };
    let answers = transcript.into_answers(&STANDARD_PLATES)?;
    let preferences = FilePreferences::load(&settings.preferences)?;
    let verdict = classify(&STANDARD_PLATES, &answers, display_mode(&preferences));
    println!("{}", verdict.label());
    println!("{}", verdict.hint());
    Ok(())
}

/// Parses `0,0,1,-` style answer lists. `-` or an empty entry marks an unanswered plate.
fn parse_answers(raw: &str) -> Result<AnswerRecord> {
    let choices = raw
        .split(',')
        .map(str::trim)
        .map(|entry| match entry {
            "" | "-" => Ok(None),
            index => index
                .parse::<usize>()
                .map(Some)
                .with_context(|| format!("`{index}` is not an option index")),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(AnswerRecord::from_choices(choices))
}

fn run_pair(settings: &Settings, args: &PairArgs) -> Result<()> {
    let preferences = FilePreferences::load(&settings.preferences)?;
    let axis = AxisSelection::parse_or_default(&args.axis).resolve(detected_deficiency(&preferences));
    let pair = match args.seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            generate(&mut rng, axis, args.delta, args.assist)
        }
        None => generate_random(axis, args.delta, args.assist),
    };

    let assisted = if args.assist { ", assisted" } else { "" };
    println!(
        "{} (delta {}{assisted})",
        axis.label(),
        effective_delta(args.delta, args.assist)
    );
    println!("base {}  {}  {}", swatch(pair.base), pair.base, pair.base.to_rgb());
    println!("odd  {}  {}  {}", swatch(pair.odd), pair.odd, pair.odd.to_rgb());
    Ok(())
}

fn run_train(settings: &Settings, args: &TrainArgs) -> Result<()> {
    let preferences = FilePreferences::load(&settings.preferences)?;
    let mut rng = seeded_rng(args.seed);
    let mut session = TrainingSession::new(
        &mut rng,
        AxisSelection::parse_or_default(&args.axis),
        detected_deficiency(&preferences),
        args.assist,
    );
    println!("Find the cell whose color differs and type its number.");
    println!("Commands: e (easier), h (harder), a (toggle assist), r (reset), q (quit).");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut picks = 0;
    while picks < args.rounds {
        print_board(&session);
        prompt("> ")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;
        match line.trim() {
            "q" | "quit" => break,
            "e" | "easier" => session.easier(&mut rng),
            "h" | "harder" => session.harder(&mut rng),
            "a" | "assist" => {
                let assist = !session.assist();
                session.set_assist(&mut rng, assist);
            }
            "r" | "reset" => session.reset(&mut rng),
            raw => match raw.parse::<usize>() {
                Ok(cell) if cell >= 1 => match session.pick(&mut rng, cell - 1) {
                    Ok(outcome) => {
                        picks += 1;
                        println!("{}", outcome.message());
                    }
                    Err(error) => println!("{error}"),
                },
                _ => println!("Enter a cell number or one of e, h, a, r, q."),
            },
        }
    }
    println!("{}", session.status());
    Ok(())
}

fn print_board(session: &TrainingSession) {
    let board = session.board();
    println!();
    println!("{}", session.status());
    for row in 0..board.side() {
        let cells: String = (0..board.side())
            .filter_map(|column| {
                let cell = row * board.side() + column;
                board
                    .color(cell)
                    .map(|color| format!("{}{:>3} {RESET}", background(color), cell + 1))
            })
            .collect();
        println!("{cells}");
    }
}

fn run_mode(settings: &Settings, args: &ModeArgs) -> Result<()> {
    let mut preferences = FilePreferences::load(&settings.preferences)?;
    let mode = match &args.value {
        Some(raw) => {
            let mode = set_display_mode(&mut preferences, raw);
            if preferences.save()? {
                info!(path = %preferences.path().display(), mode = mode.as_str(), "display mode saved");
            }
            mode
        }
        None => display_mode(&preferences),
    };
    println!("{} ({})", mode.label(), mode.as_str());
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
}

fn prompt(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush().context("failed to flush stdout")
}

const RESET: &str = "\x1b[0m";

/// Truecolor escape setting the background to `color`.
fn background(color: Hsl) -> String {
    let rgb = color.to_rgb();
    format!("\x1b[48;2;{};{};{}m", rgb.red(), rgb.green(), rgb.blue())
}

fn swatch(color: Hsl) -> String {
    format!("{}    {RESET}", background(color))
}
