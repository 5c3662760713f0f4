//! Interactive selection: class toggles, then the length slider driven from the keyboard.

use std::cell::Cell;
use std::io;

use anyhow::Context;
use console::{Key, Term};

use passgen::{CharacterClass, ClassSet, RangeSelector, Settings};

use crate::ProgError;

/// Width of the slider as drawn on the terminal, in cells.
const SLIDER_CELLS: usize = 40;

pub(crate) fn pick(settings: &Settings, copy: bool) -> Result<(), ProgError> {
    let classes = select_classes(settings.classes)?;
    let length = select_length(settings)?;

    let request = crate::generate::Request {
        classes,
        length,
        retry: settings.retry_policy(),
    };
    crate::generate::generate(&request, 1, copy, false)
}

fn select_classes(defaults: ClassSet) -> Result<ClassSet, ProgError> {
    let names = CharacterClass::ALL.map(CharacterClass::name);
    let checked = CharacterClass::ALL.map(|class| defaults.is_enabled(class));
    let selection =
        dialoguer::MultiSelect::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt("Characters to include")
            .items(&names)
            .defaults(&checked)
            .interact_opt()
            .context("failed to query your selection")?
            .ok_or(ProgError::SelectionCancelled)?;

    Ok(selection
        .into_iter()
        .map(|index| CharacterClass::ALL[index])
        .collect())
}

/// Run the slider until Enter. Each arrow key press moves a virtual pointer by one step.
fn select_length(settings: &Settings) -> Result<usize, ProgError> {
    let term = Term::stderr();
    let geometry = settings.slider.geometry();
    let shown = Cell::new(0u32);
    let mut slider = RangeSelector::new(geometry, settings.slider.max_characters, |value| {
        log::debug!("slider value changed to {}", value);
        shown.set(value);
    })?;

    let mut pointer_x = 0.0;
    term.write_line("Length (←/→ to drag, Enter to accept, Esc to cancel):")
        .context("failed to write to the terminal")?;
    term.hide_cursor().context("failed to hide the cursor")?;
    let result = loop {
        draw(&term, &slider, geometry.track_width, shown.get())
            .context("failed to draw the slider")?;
        let key = match term.read_key() {
            Ok(key) => key,
            Err(err) => {
                let err = anyhow::Error::new(err).context("failed to read a key");
                break Err(ProgError::from(err));
            }
        };
        let delta = match key {
            Key::ArrowLeft | Key::Char('h') => -slider.step(),
            Key::ArrowRight | Key::Char('l') => slider.step(),
            Key::Enter => break Ok(shown.get() as usize),
            Key::Escape | Key::Char('q') => break Err(ProgError::SelectionCancelled),
            _ => continue,
        };
        slider.begin(pointer_x);
        // A move off either end is dropped, so the pointer only follows accepted moves.
        if slider.move_to(pointer_x + delta) {
            pointer_x += delta;
        }
        slider.end();
    };
    term.show_cursor().context("failed to show the cursor")?;
    term.write_line("").context("failed to write to the terminal")?;
    result
}

fn draw<F>(
    term: &Term,
    slider: &RangeSelector<F>,
    track_width: f64,
    value: u32,
) -> io::Result<()> {
    let filled = if track_width > 0.0 {
        ((slider.left_track_width() / track_width) * SLIDER_CELLS as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(SLIDER_CELLS);
    let line = format!(
        "[{}o{}] {:>3}",
        "=".repeat(filled),
        "-".repeat(SLIDER_CELLS - filled),
        value
    );
    term.clear_line()?;
    term.write_str(&line)
}
