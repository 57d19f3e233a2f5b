//! Scriptable engine used by the view and session unit tests.

use super::{
    Difficulty, EngineError, GameConfig, GameEngine, GameStatus, HelperAllowance, HelperKind,
    MaskSlot, RoundStatus, RoundView, Statistics,
};

#[derive(Debug)]
pub(crate) struct StubEngine {
    pub status: Option<GameStatus>,
    pub languages: Vec<String>,
    pub language: Option<String>,
    pub categories: Vec<String>,
    pub selected: Vec<String>,
    pub difficulty: Option<Difficulty>,
    pub round: Option<RoundView>,
    pub statistics: Option<Statistics>,
    pub prove_result: bool,
    pub helper_error: Option<EngineError>,
    pub play_error: Option<EngineError>,
    pub proved: Vec<char>,
    pub calls: Vec<&'static str>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            status: Some(GameStatus::Setup),
            languages: vec!["en".into(), "es".into()],
            language: None,
            categories: vec!["animals".into(), "food".into()],
            selected: Vec::new(),
            difficulty: None,
            round: None,
            statistics: Some(Statistics::default()),
            prove_result: true,
            helper_error: None,
            play_error: None,
            proved: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Engine in the middle of a round of "a b" with nothing guessed.
    pub fn playing() -> Self {
        let mut engine = Self::new();
        engine.language = Some("en".into());
        engine.selected = engine.categories.clone();
        engine.difficulty = Some(Difficulty::Normal);
        engine.status = Some(GameStatus::Playing);
        engine.round = Some(RoundView {
            status: RoundStatus::InProgress,
            completed: false,
            mask: vec![MaskSlot::Hidden, MaskSlot::Space, MaskSlot::Hidden],
            remaining_letters: ('a'..='z').collect(),
            category: Some("animals".into()),
            definition: None,
            hints: Vec::new(),
            hidden_hints: 1,
            remaining_attempts: 6,
            remaining_helpers: HelperKind::ALL.into_iter().map(|k| (k, 1)).collect(),
        });
        engine
    }

    pub fn round_mut(&mut self) -> &mut RoundView {
        self.round.as_mut().expect("stub has no round")
    }

    pub fn called(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| **c == name).count()
    }
}

impl GameEngine for StubEngine {
    fn status(&self) -> Option<GameStatus> {
        self.status
    }

    fn languages(&self) -> Vec<String> {
        self.languages.clone()
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    fn set_language(&mut self, language: Option<&str>) -> Result<(), EngineError> {
        self.calls.push("set_language");
        self.language = language.map(str::to_string);
        Ok(())
    }

    fn available_categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    fn selected_categories(&self) -> Vec<String> {
        self.selected.clone()
    }

    fn add_category(&mut self, category: &str) -> Result<(), EngineError> {
        self.calls.push("add_category");
        if !self.selected.iter().any(|c| c == category) {
            self.selected.push(category.to_string());
        }
        Ok(())
    }

    fn remove_category(&mut self, category: &str) {
        self.calls.push("remove_category");
        self.selected.retain(|c| c != category);
    }

    fn available_words(&self) -> usize {
        self.selected.len() * 4
    }

    fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.calls.push("set_difficulty");
        self.difficulty = Some(difficulty);
    }

    fn alphabet(&self) -> Vec<char> {
        ('a'..='z').collect()
    }

    fn config(&self) -> Option<GameConfig> {
        self.status?;
        Some(GameConfig {
            language: self.language.clone(),
            categories: self.selected.iter().cloned().collect(),
            difficulty: self.difficulty,
            attempts: 6,
            helpers: HelperKind::ALL
                .into_iter()
                .map(|kind| HelperAllowance { kind, uses: 1 })
                .collect(),
        })
    }

    fn round(&self) -> Option<RoundView> {
        self.round.clone()
    }

    fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.calls.push("play");
        if let Some(err) = self.play_error.clone() {
            return Err(err);
        }
        self.status = Some(GameStatus::Playing);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.calls.push("pause");
        self.status = Some(GameStatus::Paused);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        self.calls.push("resume");
        self.status = Some(GameStatus::Playing);
        Ok(())
    }

    fn next(&mut self) -> Result<(), EngineError> {
        self.calls.push("next");
        Ok(())
    }

    fn finish(&mut self) {
        self.calls.push("finish");
        self.status = Some(GameStatus::Finished);
    }

    fn prove_letter(&mut self, letter: char) -> Result<bool, EngineError> {
        self.calls.push("prove_letter");
        self.proved.push(letter);
        Ok(self.prove_result)
    }

    fn use_helper(&mut self, _kind: HelperKind) -> Result<(), EngineError> {
        self.calls.push("use_helper");
        match self.helper_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

