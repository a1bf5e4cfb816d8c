//! # Terminal Front-End
//!
//! Line-oriented rendering of the quiz. Each screen is printed, one line of
//! input is read, and the matching engine operation is applied.
//!
//! | Screen   | Input                 | Action                  |
//! |----------|-----------------------|-------------------------|
//! | welcome  | empty / `s`           | start                   |
//! | question | `1`..`9`              | select option           |
//! | question | empty / `n`           | advance                 |
//! | question | `b`                   | retreat                 |
//! | question | `r`                   | restart                 |
//! | results  | `b`                   | back to last question   |
//! | results  | `r`                   | restart                 |
//! | any      | `q` / end of input    | quit, progress is kept  |

use advisor_core::{Advance, AdvisorError, DEMO_URL, QuizEngine, Screen};
use std::io::{BufRead, Write};

const PROGRESS_WIDTH: usize = 20;

fn io_err(e: std::io::Error) -> AdvisorError {
    AdvisorError::IoError(e.to_string())
}

/// Read one trimmed line. `None` at end of input.
fn read_command<R: BufRead>(input: &mut R) -> Result<Option<String>, AdvisorError> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(io_err)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

/// Drive `engine` from `input` until the user quits or input ends.
pub fn run<R: BufRead, W: Write>(
    engine: &mut QuizEngine,
    mut input: R,
    mut output: W,
) -> Result<(), AdvisorError> {
    if engine.was_resumed() {
        if let Some(progress) = engine.progress() {
            writeln!(
                output,
                "Continuando donde lo dejaste: pregunta {} de {}.",
                progress.position, progress.total
            )
            .map_err(io_err)?;
        }
    }

    loop {
        match engine.screen() {
            Screen::Welcome => render_welcome(&mut output)?,
            Screen::Question { .. } => render_question(engine, &mut output)?,
            Screen::Results => render_results(engine, &mut output)?,
        }
        write!(output, "> ").map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let Some(command) = read_command(&mut input)? else {
            writeln!(output).map_err(io_err)?;
            return Ok(());
        };
        if command == "q" {
            return Ok(());
        }

        match engine.screen() {
            Screen::Welcome => match command.as_str() {
                "" | "s" => engine.start(),
                _ => writeln!(output, "Pulsa Enter para comenzar o q para salir.").map_err(io_err)?,
            },
            Screen::Question { .. } => handle_question(engine, &command, &mut output)?,
            Screen::Results => match command.as_str() {
                "r" => engine.restart(),
                "b" => {
                    engine.retreat();
                }
                _ => return Ok(()),
            },
        }
    }
}

fn handle_question<W: Write>(
    engine: &mut QuizEngine,
    command: &str,
    output: &mut W,
) -> Result<(), AdvisorError> {
    match command {
        "" | "n" => {
            if engine.advance() == Advance::Blocked {
                writeln!(output, "Selecciona una opción para continuar.").map_err(io_err)?;
            }
        }
        "b" => {
            if !engine.retreat() {
                writeln!(output, "Ya estás en la primera pregunta.").map_err(io_err)?;
            }
        }
        "r" => engine.restart(),
        other => {
            let picked = other.parse::<usize>().ok().and_then(|n| {
                let question = engine.current_question()?;
                let option = question.options.get(n.checked_sub(1)?)?;
                Some((question.id.clone(), option.value.clone()))
            });
            match picked {
                Some((id, value)) => engine.select_option(&id, &value)?,
                None => writeln!(output, "Opción no válida.").map_err(io_err)?,
            }
        }
    }
    Ok(())
}

// =============================================================================
// RENDERING
// =============================================================================

fn render_welcome<W: Write>(output: &mut W) -> Result<(), AdvisorError> {
    writeln!(output).map_err(io_err)?;
    writeln!(output, "Diagnóstico de Gestión de Turnos").map_err(io_err)?;
    writeln!(
        output,
        "Descubre tu nivel de madurez y recibe recomendaciones personalizadas en 2 minutos"
    )
    .map_err(io_err)?;
    writeln!(output).map_err(io_err)?;
    writeln!(output, "[Enter] Comenzar diagnóstico   [q] Salir").map_err(io_err)
}

fn render_question<W: Write>(engine: &QuizEngine, output: &mut W) -> Result<(), AdvisorError> {
    let (Some(question), Some(progress)) = (engine.current_question(), engine.progress()) else {
        return Ok(());
    };
    let selected = engine.selected(&question.id);

    let filled = progress.position.saturating_mul(PROGRESS_WIDTH) / progress.total.max(1);
    writeln!(output).map_err(io_err)?;
    writeln!(
        output,
        "[{}{}] Pregunta {} de {}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH.saturating_sub(filled)),
        progress.position,
        progress.total
    )
    .map_err(io_err)?;
    writeln!(output).map_err(io_err)?;
    writeln!(output, "{}", question.text).map_err(io_err)?;

    for (i, option) in question.options.iter().enumerate() {
        let mark = if selected == Some(option.value.as_str()) { "x" } else { " " };
        writeln!(output, "  ({}) {}. {}", mark, i + 1, option.label).map_err(io_err)?;
    }

    let next = if progress.position == progress.total {
        "Ver resultados"
    } else {
        "Siguiente"
    };
    writeln!(output).map_err(io_err)?;
    if progress.position > 1 {
        writeln!(output, "[1-{}] Elegir   [Enter] {}   [b] Anterior   [q] Salir", question.options.len(), next)
            .map_err(io_err)
    } else {
        writeln!(output, "[1-{}] Elegir   [Enter] {}   [q] Salir", question.options.len(), next)
            .map_err(io_err)
    }
}

fn render_results<W: Write>(engine: &QuizEngine, output: &mut W) -> Result<(), AdvisorError> {
    let assessment = engine.assessment()?;
    let profile = assessment.profile;

    writeln!(output).map_err(io_err)?;
    writeln!(output, "{} puntos", assessment.score).map_err(io_err)?;
    writeln!(output, "{} Nivel {}", profile.icon, profile.name).map_err(io_err)?;
    writeln!(output).map_err(io_err)?;
    writeln!(output, "\"{}\"", profile.diagnosis).map_err(io_err)?;
    writeln!(output).map_err(io_err)?;
    writeln!(output, "⚠️  Problemas comunes en tu nivel").map_err(io_err)?;
    for problem in &profile.problems {
        writeln!(output, "  - {}", problem).map_err(io_err)?;
    }
    writeln!(output).map_err(io_err)?;
    writeln!(output, "✅ 3 Quick Wins para esta semana").map_err(io_err)?;
    for win in &profile.wins {
        writeln!(output, "  - {}", win).map_err(io_err)?;
    }
    writeln!(output).map_err(io_err)?;
    writeln!(output, "Agenda una demo de Clonk: {}", DEMO_URL).map_err(io_err)?;
    writeln!(output, "Compartir: {}", assessment.share_text()).map_err(io_err)?;
    writeln!(output).map_err(io_err)?;
    writeln!(output, "[b] Anterior   [r] Hacer el diagnóstico de nuevo   [Enter] Salir").map_err(io_err)
}
