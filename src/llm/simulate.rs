use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Language;

pub const SIMULATED_SUBJECTS_EN: [&str; 5] = [
    "a generic selfie",
    "someone trying to look cool",
    "a person posing with questionable fashion sense",
    "an attempt at being an influencer",
    "a low-quality snapshot",
];

pub const SIMULATED_SUBJECTS_ES: [&str; 5] = [
    "un selfie genérico",
    "alguien intentando parecer guay",
    "una persona posando con un sentido de la moda cuestionable",
    "un intento de ser influencer",
    "una instantánea de baja calidad",
];

/// Produces placeholder analysis fragments when the real image-analysis
/// service is disabled or unavailable. The RNG is injected at construction so
/// tests can seed it and assert exact output.
pub struct AnalysisSimulator {
    rng: Mutex<StdRng>,
}

impl AnalysisSimulator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn simulate(&self, language: Language) -> String {
        let subjects = match language {
            Language::En => &SIMULATED_SUBJECTS_EN,
            Language::Es => &SIMULATED_SUBJECTS_ES,
        };
        let index = self.rng.lock().random_range(0..subjects.len());
        let subject = subjects[index];

        match language {
            Language::En => format!(
                "The image appears to be of {subject}. Based on this, the subject might be a bit predictable or trying too hard."
            ),
            Language::Es => format!(
                "La imagen parece ser de {subject}. Basándonos en esto, el sujeto podría ser un poco predecible o estar esforzándose demasiado."
            ),
        }
    }
}

impl Default for AnalysisSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_the_same_fragment() {
        let first = AnalysisSimulator::from_seed(42).simulate(Language::En);
        let second = AnalysisSimulator::from_seed(42).simulate(Language::En);
        assert_eq!(first, second);
    }

    #[test]
    fn fragments_come_from_the_candidate_list() {
        let simulator = AnalysisSimulator::new();
        for _ in 0..20 {
            let fragment = simulator.simulate(Language::En);
            assert!(SIMULATED_SUBJECTS_EN
                .iter()
                .any(|subject| fragment.contains(subject)));
            assert!(fragment.starts_with("The image appears to be of"));
        }
    }

    #[test]
    fn spanish_fragments_use_the_spanish_sentence() {
        let fragment = AnalysisSimulator::from_seed(7).simulate(Language::Es);
        assert!(fragment.starts_with("La imagen parece ser de"));
        assert!(SIMULATED_SUBJECTS_ES
            .iter()
            .any(|subject| fragment.contains(subject)));
    }
}
