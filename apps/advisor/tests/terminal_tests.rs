//! Scripted sessions against the terminal front-end.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use advisor::cli::terminal;
use advisor_core::{Catalog, Level, QuizEngine, Screen, Session, SessionStore};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Run `script` (one command per line) and return everything printed.
fn play(engine: &mut QuizEngine, script: &str) -> String {
    let mut output = Vec::new();
    terminal::run(engine, Cursor::new(script.as_bytes()), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_full_session_prints_results() {
    let mut engine = QuizEngine::in_memory();

    // start, then pick and confirm each of the five questions, then quit
    let output = play(&mut engine, "\n1\n\n2\n\n2\n\n3\n\n2\n\n\n");

    assert!(output.contains("Diagnóstico de Gestión de Turnos"));
    assert!(output.contains("Pregunta 1 de 5"));
    assert!(output.contains("Pregunta 5 de 5"));
    assert!(output.contains("58 puntos"));
    assert!(output.contains("Nivel Estructurado"));
    assert!(output.contains("3 Quick Wins para esta semana"));
    assert!(output.contains("https://meet.brevo.com/clonk/demo"));

    assert_eq!(engine.screen(), Screen::Results);
    assert_eq!(engine.session().level, Some(Level::Structured));
}

#[test]
fn test_selected_option_is_marked() {
    let mut engine = QuizEngine::in_memory();

    let output = play(&mut engine, "s\n3\nq\n");

    assert!(output.contains("(x) 3. Hotel"));
    assert_eq!(engine.selected("business_type"), Some("hotel"));
}

#[test]
fn test_advance_without_selection_warns() {
    let mut engine = QuizEngine::in_memory();

    let output = play(&mut engine, "\n\nq\n");

    assert!(output.contains("Selecciona una opción para continuar."));
    assert_eq!(engine.step(), 1);
}

#[test]
fn test_back_on_first_question_warns() {
    let mut engine = QuizEngine::in_memory();

    let output = play(&mut engine, "\nb\nq\n");

    assert!(output.contains("Ya estás en la primera pregunta."));
}

#[test]
fn test_back_returns_to_previous_question() {
    let mut engine = QuizEngine::in_memory();

    play(&mut engine, "\n2\n\nb\nq\n");

    assert_eq!(engine.step(), 1);
    assert_eq!(engine.selected("business_type"), Some("retail"));
}

#[test]
fn test_out_of_range_option_is_rejected() {
    let mut engine = QuizEngine::in_memory();

    let output = play(&mut engine, "\n9\n0\nabc\nq\n");

    assert_eq!(output.matches("Opción no válida.").count(), 3);
    assert!(engine.session().answers.is_empty());
}

#[test]
fn test_end_of_input_keeps_progress() {
    let mut engine = QuizEngine::in_memory();

    play(&mut engine, "\n1\n\n4\n");

    assert_eq!(engine.step(), 2);
    assert_eq!(engine.selected("employee_count"), Some("50+"));
    let saved = engine.store().try_read().unwrap().unwrap();
    assert_eq!(&saved, engine.session());
}

#[test]
fn test_restart_from_results() {
    let mut engine = QuizEngine::in_memory();

    play(&mut engine, "\n1\n\n1\n\n1\n\n1\n\n1\n\nr\nq\n");

    assert_eq!(engine.screen(), Screen::Welcome);
    assert_eq!(engine.session(), &Session::new());
}

#[test]
fn test_resumed_session_announces_position() {
    let mut store = SessionStore::in_memory();
    let mut answers = BTreeMap::new();
    answers.insert("business_type".to_string(), "services".to_string());
    store
        .try_save(&Session {
            step: 2,
            answers,
            score: None,
            level: None,
        })
        .unwrap();
    let mut engine = QuizEngine::new(Catalog::builtin(), store);

    let output = play(&mut engine, "q\n");

    assert!(output.contains("Continuando donde lo dejaste: pregunta 2 de 5."));
    assert!(output.contains("Pregunta 2 de 5"));
}

#[test]
fn test_back_from_results_reopens_last_question() {
    let mut engine = QuizEngine::in_memory();

    let output = play(&mut engine, "\n1\n\n1\n\n1\n\n1\n\n1\n\nb\nq\n");

    assert!(output.contains("puntos"));
    assert_eq!(engine.screen(), Screen::Question { index: 4 });
    assert!(engine.session().score.is_none());
    assert_eq!(engine.selected("schedule_changes"), Some("daily"));
}
