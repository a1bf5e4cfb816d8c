//! # Question Catalog
//!
//! The ordered list of questions asked by the quiz, plus the result content
//! shown for each maturity level.
//!
//! The built-in catalog is the shift-scheduling diagnostic. Alternative
//! catalogs can be loaded from TOML; every catalog is validated on
//! construction so the engine can rely on:
//! - question ids being non-empty and unique
//! - option values being unique within their question
//! - diagnostic options carrying a weight in `MIN_OPTION_WEIGHT..=MAX_OPTION_WEIGHT`
//! - context options carrying no weight

use crate::primitives::{MAX_OPTION_WEIGHT, MIN_OPTION_WEIGHT};
use crate::{AdvisorError, Level, Question, QuestionKind, QuizOption};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Booking link offered on the results screen.
pub const DEMO_URL: &str = "https://meet.brevo.com/clonk/demo";

// =============================================================================
// CATALOG
// =============================================================================

/// A validated, ordered list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    questions: Vec<Question>,
}

/// On-disk shape of a TOML catalog.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    questions: Vec<Question>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Build a catalog from questions, validating every structural rule.
    pub fn new(questions: Vec<Question>) -> Result<Self, AdvisorError> {
        validate(&questions)?;
        Ok(Self { questions })
    }

    /// Parse and validate a TOML catalog.
    pub fn from_toml_str(source: &str) -> Result<Self, AdvisorError> {
        let file: CatalogFile = toml::from_str(source)
            .map_err(|e| AdvisorError::InvalidCatalog(format!("TOML parse error: {}", e)))?;
        Self::new(file.questions)
    }

    /// The shift-scheduling diagnostic shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            questions: builtin_questions(),
        }
    }

    /// All questions in order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions (`N`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Question at a 1-based step, if the step is a question step.
    #[must_use]
    pub fn at_step(&self, step: usize) -> Option<&Question> {
        step.checked_sub(1).and_then(|i| self.questions.get(i))
    }

    /// Step index of the results screen (`N + 1`).
    #[must_use]
    pub fn results_step(&self) -> usize {
        self.questions.len().saturating_add(1)
    }

    /// Diagnostic questions, in order.
    pub fn diagnostic(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.is_diagnostic())
    }

    /// True if `value` is one of the options of question `id`.
    #[must_use]
    pub fn accepts(&self, id: &str, value: &str) -> bool {
        self.question(id).is_some_and(|q| q.option(value).is_some())
    }
}

fn validate(questions: &[Question]) -> Result<(), AdvisorError> {
    if questions.is_empty() {
        return Err(AdvisorError::InvalidCatalog(
            "catalog has no questions".to_string(),
        ));
    }

    let mut ids = BTreeSet::new();
    for question in questions {
        if question.id.is_empty() {
            return Err(AdvisorError::InvalidCatalog(
                "question id must not be empty".to_string(),
            ));
        }
        if !ids.insert(question.id.as_str()) {
            return Err(AdvisorError::InvalidCatalog(format!(
                "duplicate question id '{}'",
                question.id
            )));
        }
        if question.options.is_empty() {
            return Err(AdvisorError::InvalidCatalog(format!(
                "question '{}' has no options",
                question.id
            )));
        }

        let mut values = BTreeSet::new();
        for option in &question.options {
            if !values.insert(option.value.as_str()) {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "duplicate option '{}' in question '{}'",
                    option.value, question.id
                )));
            }
            match (question.kind, option.weight) {
                (QuestionKind::Context, Some(_)) => {
                    return Err(AdvisorError::InvalidCatalog(format!(
                        "context question '{}' has weighted option '{}'",
                        question.id, option.value
                    )));
                }
                (QuestionKind::Diagnostic, None) => {
                    return Err(AdvisorError::InvalidCatalog(format!(
                        "diagnostic option '{}' in '{}' has no weight",
                        option.value, question.id
                    )));
                }
                (QuestionKind::Diagnostic, Some(w))
                    if !(MIN_OPTION_WEIGHT..=MAX_OPTION_WEIGHT).contains(&w) =>
                {
                    return Err(AdvisorError::InvalidCatalog(format!(
                        "weight {} of '{}' in '{}' outside {}..={}",
                        w, option.value, question.id, MIN_OPTION_WEIGHT, MAX_OPTION_WEIGHT
                    )));
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn builtin_questions() -> Vec<Question> {
    vec![
        Question::new(
            "business_type",
            "¿Qué tipo de negocio tienes?",
            QuestionKind::Context,
            vec![
                QuizOption::new("restaurant", "Restaurante"),
                QuizOption::new("retail", "Retail"),
                QuizOption::new("hotel", "Hotel"),
                QuizOption::new("services", "Servicios"),
                QuizOption::new("other", "Otro"),
            ],
        ),
        Question::new(
            "employee_count",
            "¿Cuántos empleados programas regularmente?",
            QuestionKind::Context,
            vec![
                QuizOption::new("1-10", "1-10"),
                QuizOption::new("11-30", "11-30"),
                QuizOption::new("31-50", "31-50"),
                QuizOption::new("50+", "Más de 50"),
            ],
        ),
        Question::new(
            "scheduling_method",
            "¿Cómo programas los turnos actualmente?",
            QuestionKind::Diagnostic,
            vec![
                QuizOption::weighted("paper", "Papel o pizarra", 1),
                QuizOption::weighted("excel", "Excel o Google Sheets", 2),
                QuizOption::weighted("whatsapp", "WhatsApp + improvisación", 1),
                QuizOption::weighted("software", "Software especializado", 4),
            ],
        ),
        Question::new(
            "overtime_tracking",
            "¿Sabes cuántas horas extras generaste el mes pasado?",
            QuestionKind::Diagnostic,
            vec![
                QuizOption::weighted("no_idea", "No tengo idea", 1),
                QuizOption::weighted(
                    "many",
                    "Sé que fueron muchas pero no el número exacto",
                    2,
                ),
                QuizOption::weighted("approximate", "Sí, tengo el número aproximado", 3),
                QuizOption::weighted("weekly", "Sí, lo mido cada semana", 4),
            ],
        ),
        Question::new(
            "schedule_changes",
            "¿Con qué frecuencia cambias turnos a última hora?",
            QuestionKind::Diagnostic,
            vec![
                QuizOption::weighted("daily", "Casi todos los días", 1),
                QuizOption::weighted("weekly", "Varias veces por semana", 2),
                QuizOption::weighted("occasional", "Ocasionalmente", 3),
                QuizOption::weighted("rare", "Rara vez, todo está planificado", 4),
            ],
        ),
    ]
}

// =============================================================================
// LEVEL PROFILES
// =============================================================================

/// Result content shown for a maturity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProfile {
    pub level: Level,
    pub name: &'static str,
    pub icon: &'static str,
    /// Accent color as a CSS hex string.
    pub color: &'static str,
    pub diagnosis: &'static str,
    pub problems: [&'static str; 3],
    pub wins: [&'static str; 3],
}

const REACTIVE: LevelProfile = LevelProfile {
    level: Level::Reactive,
    name: "Reactivo",
    icon: "🔥",
    color: "#F54359",
    diagnosis: "Tu gestión de turnos está en modo supervivencia",
    problems: [
        "Horas extras no planificadas que disparan costos",
        "Empleados insatisfechos por cambios constantes",
        "No sabes cuánto te cuesta realmente la nómina hasta fin de mes",
    ],
    wins: [
        "Empieza a registrar las horas extras esta semana (aunque sea en papel)",
        "Define un \"día de cierre\" de turnos (ej: jueves para la próxima semana)",
        "Identifica tus 3 empleados más flexibles para emergencias",
    ],
};

const STRUCTURED: LevelProfile = LevelProfile {
    level: Level::Structured,
    name: "Estructurado",
    icon: "⚙️",
    color: "#ec6851",
    diagnosis: "Tienes proceso pero te falta visibilidad",
    problems: [
        "Sabes que hay ineficiencias pero no sabes cuantificarlas",
        "Los cambios de último minuto siguen generando caos",
        "Dependes de la memoria para saber quién puede cubrir qué",
    ],
    wins: [
        "Crea un dashboard simple con horas programadas vs ejecutadas",
        "Implementa un sistema de \"disponibilidad\" semanal de empleados",
        "Analiza qué día/turno genera más horas extras y por qué",
    ],
};

const OPTIMIZED: LevelProfile = LevelProfile {
    level: Level::Optimized,
    name: "Optimizado",
    icon: "🚀",
    color: "#1aa979",
    diagnosis: "Estás listo para automatizar y escalar",
    problems: [
        "El proceso manual consume tiempo que podrías usar en estrategia",
        "Dificultad para proyectar costos laborales futuros",
        "Quieres crecer pero el sistema actual no escala",
    ],
    wins: [
        "Automatiza alertas cuando un empleado se acerca a horas extras",
        "Implementa reportes de costo laboral por turno/ubicación",
        "Usa datos históricos para predecir demanda y optimizar plantilla",
    ],
};

impl Level {
    /// Result content for this level.
    #[must_use]
    pub fn profile(&self) -> &'static LevelProfile {
        match self {
            Level::Reactive => &REACTIVE,
            Level::Structured => &STRUCTURED,
            Level::Optimized => &OPTIMIZED,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
