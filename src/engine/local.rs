use std::collections::{BTreeMap, BTreeSet, HashSet};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::words::{WordEntry, WordList, WORD_LISTS};
use super::{
    Difficulty, EngineError, GameConfig, GameEngine, GameStatus, HelperAllowance, HelperKind,
    MaskSlot, RoundStatus, RoundView, Statistics,
};

const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Attempts and helper allowances granted per difficulty
fn rules(difficulty: Difficulty) -> (u32, [u32; 3]) {
    match difficulty {
        Difficulty::Easy => (8, [3, 2, 2]),
        Difficulty::Normal => (6, [2, 1, 1]),
        Difficulty::Hard => (5, [1, 0, 1]),
    }
}

fn allowances(difficulty: Difficulty) -> Vec<HelperAllowance> {
    let (_, uses) = rules(difficulty);
    HelperKind::ALL
        .into_iter()
        .zip(uses)
        .map(|(kind, uses)| HelperAllowance { kind, uses })
        .collect()
}

#[derive(Debug)]
struct Round {
    entry: &'static WordEntry,
    letters: Vec<char>,
    revealed: HashSet<char>,
    remaining: Vec<char>,
    remaining_attempts: u32,
    wrong_letters: u32,
    /// Hint items uncovered so far: category, definition, then extra hints.
    revealed_hints: usize,
    helpers: BTreeMap<HelperKind, u32>,
    status: RoundStatus,
    completed: bool,
}

impl Round {
    fn new(entry: &'static WordEntry, alphabet: Vec<char>, difficulty: Difficulty) -> Self {
        let (attempts, _) = rules(difficulty);
        Self {
            entry,
            letters: entry.word.chars().filter(|c| *c != ' ').collect(),
            revealed: HashSet::new(),
            remaining: alphabet,
            remaining_attempts: attempts,
            wrong_letters: 0,
            revealed_hints: usize::from(difficulty == Difficulty::Easy),
            helpers: allowances(difficulty)
                .into_iter()
                .map(|a| (a.kind, a.uses))
                .collect(),
            status: RoundStatus::InProgress,
            completed: false,
        }
    }

    fn total_hints(&self) -> usize {
        2 + self.entry.hints.len()
    }

    fn is_solved(&self) -> bool {
        self.letters.iter().all(|c| self.revealed.contains(c))
    }

    fn view(&self) -> RoundView {
        let mask = self
            .entry
            .word
            .chars()
            .map(|c| {
                if c == ' ' {
                    MaskSlot::Space
                } else if self.revealed.contains(&c) {
                    MaskSlot::Revealed(c)
                } else {
                    MaskSlot::Hidden
                }
            })
            .collect();
        let extra = self.revealed_hints.saturating_sub(2);
        RoundView {
            status: self.status,
            completed: self.completed,
            mask,
            remaining_letters: self.remaining.clone(),
            category: (self.revealed_hints >= 1).then(|| self.entry.category.to_string()),
            definition: (self.revealed_hints >= 2).then(|| self.entry.definition.to_string()),
            hints: self.entry.hints[..extra].iter().map(|h| h.to_string()).collect(),
            hidden_hints: self.total_hints() - self.revealed_hints,
            remaining_attempts: self.remaining_attempts,
            remaining_helpers: self.helpers.clone(),
        }
    }
}

/// Small self-contained engine over the built-in word bank.
#[derive(Debug)]
pub struct LocalEngine {
    lists: &'static [WordList],
    language: Option<String>,
    categories: BTreeSet<String>,
    difficulty: Option<Difficulty>,
    status: GameStatus,
    round: Option<Round>,
    statistics: Statistics,
    used_words: HashSet<&'static str>,
    rng: StdRng,
}

impl LocalEngine {
    pub fn new(statistics: Option<Statistics>) -> Self {
        Self::with_rng(statistics, StdRng::from_entropy())
    }

    pub fn seeded(statistics: Option<Statistics>, seed: u64) -> Self {
        Self::with_rng(statistics, StdRng::seed_from_u64(seed))
    }

    fn with_rng(statistics: Option<Statistics>, rng: StdRng) -> Self {
        Self {
            lists: WORD_LISTS,
            language: None,
            categories: BTreeSet::new(),
            difficulty: None,
            status: GameStatus::Setup,
            round: None,
            statistics: statistics.unwrap_or_default(),
            used_words: HashSet::new(),
            rng,
        }
    }

    fn current_list(&self) -> Option<&'static WordList> {
        let language = self.language.as_deref()?;
        self.lists.iter().find(|l| l.language == language)
    }

    fn pool(&self) -> Vec<&'static WordEntry> {
        self.current_list()
            .map(|list| {
                list.entries
                    .iter()
                    .filter(|e| self.categories.contains(e.category))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn start_round(&mut self) -> Result<(), EngineError> {
        let difficulty = self.difficulty.ok_or(EngineError::NoDifficulty)?;
        let pool = self.pool();
        let mut fresh: Vec<_> = pool
            .iter()
            .copied()
            .filter(|e| !self.used_words.contains(e.word))
            .collect();
        if fresh.is_empty() {
            self.used_words.clear();
            fresh = pool;
        }
        let entry = *fresh.choose(&mut self.rng).ok_or(EngineError::NoWords)?;
        self.used_words.insert(entry.word);
        self.round = Some(Round::new(entry, self.alphabet(), difficulty));
        Ok(())
    }

    fn round_in_progress(
        status: GameStatus,
        round: &mut Option<Round>,
    ) -> Result<&mut Round, EngineError> {
        if status != GameStatus::Playing {
            return Err(EngineError::NotPlaying);
        }
        let round = round.as_mut().ok_or(EngineError::NoRound)?;
        if round.status == RoundStatus::Finished {
            return Err(EngineError::RoundFinished);
        }
        Ok(round)
    }

    fn conclude_round(&mut self, completed: bool) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.status = RoundStatus::Finished;
        round.completed = completed;
        let flawless = round.wrong_letters == 0;

        let stats = &mut self.statistics;
        stats.rounds += 1;
        if completed {
            stats.wins += 1;
            stats.consecutive_wins += 1;
            stats.highest_consecutive_wins =
                stats.highest_consecutive_wins.max(stats.consecutive_wins);
            if flawless {
                stats.no_wrong_letters_count += 1;
            }
        } else {
            stats.lost += 1;
            stats.consecutive_wins = 0;
        }
        log::debug!("round concluded, completed: {completed}");
    }

    fn conclude_if_solved(&mut self) {
        if self.round.as_ref().is_some_and(Round::is_solved) {
            self.conclude_round(true);
        }
    }
}

impl GameEngine for LocalEngine {
    fn status(&self) -> Option<GameStatus> {
        Some(self.status)
    }

    fn languages(&self) -> Vec<String> {
        self.lists.iter().map(|l| l.language.to_string()).collect()
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    fn set_language(&mut self, language: Option<&str>) -> Result<(), EngineError> {
        match language {
            None => self.language = None,
            Some(code) => {
                if !self.lists.iter().any(|l| l.language == code) {
                    return Err(EngineError::UnknownLanguage(code.to_string()));
                }
                self.language = Some(code.to_string());
                let available = self.available_categories();
                self.categories.retain(|c| available.contains(c));
            }
        }
        Ok(())
    }

    fn available_categories(&self) -> Vec<String> {
        let Some(list) = self.current_list() else {
            return Vec::new();
        };
        let mut categories: Vec<String> = Vec::new();
        for entry in list.entries {
            if !categories.iter().any(|c| c == entry.category) {
                categories.push(entry.category.to_string());
            }
        }
        categories
    }

    fn selected_categories(&self) -> Vec<String> {
        self.categories.iter().cloned().collect()
    }

    fn add_category(&mut self, category: &str) -> Result<(), EngineError> {
        if !self.available_categories().iter().any(|c| c == category) {
            return Err(EngineError::UnknownCategory(category.to_string()));
        }
        self.categories.insert(category.to_string());
        Ok(())
    }

    fn remove_category(&mut self, category: &str) {
        self.categories.remove(category);
    }

    fn available_words(&self) -> usize {
        self.pool().len()
    }

    fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = Some(difficulty);
    }

    fn alphabet(&self) -> Vec<char> {
        self.current_list()
            .map(WordList::alphabet)
            .unwrap_or_else(|| DEFAULT_ALPHABET.chars().collect())
    }

    fn config(&self) -> Option<GameConfig> {
        Some(GameConfig {
            language: self.language.clone(),
            categories: self.categories.clone(),
            difficulty: self.difficulty,
            attempts: self.difficulty.map(|d| rules(d).0).unwrap_or(0),
            helpers: self.difficulty.map(allowances).unwrap_or_default(),
        })
    }

    fn round(&self) -> Option<RoundView> {
        self.round.as_ref().map(Round::view)
    }

    fn statistics(&self) -> Option<&Statistics> {
        Some(&self.statistics)
    }

    fn play(&mut self) -> Result<(), EngineError> {
        if matches!(self.status, GameStatus::Playing | GameStatus::Paused) {
            return Err(EngineError::AlreadyPlaying);
        }
        if self.language.is_none() {
            return Err(EngineError::NoLanguage);
        }
        if self.difficulty.is_none() {
            return Err(EngineError::NoDifficulty);
        }
        if self.pool().is_empty() {
            return Err(EngineError::NoWords);
        }
        self.start_round()?;
        self.status = GameStatus::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        if self.status != GameStatus::Playing {
            return Err(EngineError::NotPlaying);
        }
        self.status = GameStatus::Paused;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        if self.status != GameStatus::Paused {
            return Err(EngineError::NotPaused);
        }
        self.status = GameStatus::Playing;
        Ok(())
    }

    fn next(&mut self) -> Result<(), EngineError> {
        if self.status != GameStatus::Playing {
            return Err(EngineError::NotPlaying);
        }
        // Skipping an unfinished word counts as a loss.
        if self
            .round
            .as_ref()
            .is_some_and(|r| r.status == RoundStatus::InProgress)
        {
            self.conclude_round(false);
        }
        self.start_round()
    }

    fn finish(&mut self) {
        if matches!(self.status, GameStatus::Playing | GameStatus::Paused) {
            self.status = GameStatus::Finished;
            self.round = None;
        }
    }

    fn prove_letter(&mut self, letter: char) -> Result<bool, EngineError> {
        let alphabet = self.alphabet();
        let round = Self::round_in_progress(self.status, &mut self.round)?;
        if !alphabet.contains(&letter) {
            return Err(EngineError::InvalidLetter(letter));
        }
        let Some(pos) = round.remaining.iter().position(|c| *c == letter) else {
            return Err(EngineError::LetterUsed(letter));
        };
        round.remaining.remove(pos);

        let hit = round.letters.contains(&letter);
        if hit {
            round.revealed.insert(letter);
            self.statistics.correct_letter_count += 1;
            self.conclude_if_solved();
        } else {
            round.remaining_attempts = round.remaining_attempts.saturating_sub(1);
            round.wrong_letters += 1;
            let exhausted = round.remaining_attempts == 0;
            self.statistics.wrong_letter_count += 1;
            if exhausted {
                self.conclude_round(false);
            }
        }
        Ok(hit)
    }

    fn use_helper(&mut self, kind: HelperKind) -> Result<(), EngineError> {
        let round = Self::round_in_progress(self.status, &mut self.round)?;
        let uses = round.helpers.get(&kind).copied().unwrap_or(0);
        if uses == 0 {
            return Err(EngineError::HelperExhausted(kind));
        }

        match kind {
            HelperKind::DiscardLetter | HelperKind::RevealLetter => {
                let wanted = kind == HelperKind::RevealLetter;
                let candidates: Vec<char> = round
                    .remaining
                    .iter()
                    .copied()
                    .filter(|c| round.letters.contains(c) == wanted)
                    .collect();
                let letter = *candidates
                    .choose(&mut self.rng)
                    .ok_or(EngineError::NothingLeft(kind))?;
                round.remaining.retain(|c| *c != letter);
                if wanted {
                    round.revealed.insert(letter);
                }
            }
            HelperKind::RevealHint => {
                if round.revealed_hints >= round.total_hints() {
                    return Err(EngineError::NothingLeft(kind));
                }
                round.revealed_hints += 1;
            }
        }

        round.helpers.insert(kind, uses - 1);
        *self.statistics.helpers_count.entry(kind).or_insert(0) += 1;
        self.conclude_if_solved();
        Ok(())
    }
}
