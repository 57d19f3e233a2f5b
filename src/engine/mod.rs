//! The game engine surface consumed by the terminal session.
//!
//! Views never reach into engine internals: they read snapshots
//! ([`RoundView`], [`GameConfig`], [`Statistics`]) and mutate through the
//! operations on [`GameEngine`].

pub mod local;
#[cfg(test)]
pub(crate) mod stub;
pub mod words;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use local::LocalEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameStatus {
    Setup,
    Playing,
    Paused,
    Finished,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Limited-use assists available during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::Display)]
pub enum HelperKind {
    #[strum(serialize = "Discard letter")]
    DiscardLetter,
    #[strum(serialize = "Reveal letter")]
    RevealLetter,
    #[strum(serialize = "Reveal hint")]
    RevealHint,
}

impl HelperKind {
    pub const ALL: [HelperKind; 3] = [
        HelperKind::DiscardLetter,
        HelperKind::RevealLetter,
        HelperKind::RevealHint,
    ];

    /// Board key that triggers the helper.
    pub fn key(self) -> char {
        match self {
            HelperKind::DiscardLetter => '1',
            HelperKind::RevealLetter => '2',
            HelperKind::RevealHint => '3',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Stable name used in the statistics file.
    pub fn as_str(self) -> &'static str {
        match self {
            HelperKind::DiscardLetter => "discard_letter",
            HelperKind::RevealLetter => "reveal_letter",
            HelperKind::RevealHint => "reveal_hint",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskSlot {
    Hidden,
    Revealed(char),
    Space,
}

/// Snapshot of the current round as the player is allowed to see it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundView {
    pub status: RoundStatus,
    pub completed: bool,
    pub mask: Vec<MaskSlot>,
    pub remaining_letters: Vec<char>,
    pub category: Option<String>,
    pub definition: Option<String>,
    pub hints: Vec<String>,
    /// Hints that the reveal-hint helper could still uncover.
    pub hidden_hints: usize,
    pub remaining_attempts: u32,
    pub remaining_helpers: BTreeMap<HelperKind, u32>,
}

impl RoundView {
    pub fn is_finished(&self) -> bool {
        self.status == RoundStatus::Finished
    }

    pub fn remaining_helpers(&self, kind: HelperKind) -> u32 {
        self.remaining_helpers.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_remaining(&self, letter: char) -> bool {
        self.remaining_letters.contains(&letter)
    }

    /// Whether `letter` is visible in the mask.
    pub fn reveals(&self, letter: char) -> bool {
        self.mask.contains(&MaskSlot::Revealed(letter))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperAllowance {
    pub kind: HelperKind,
    pub uses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub language: Option<String>,
    pub categories: BTreeSet<String>,
    pub difficulty: Option<Difficulty>,
    pub attempts: u32,
    pub helpers: Vec<HelperAllowance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statistics {
    pub rounds: u64,
    pub wins: u64,
    pub lost: u64,
    pub consecutive_wins: u64,
    pub highest_consecutive_wins: u64,
    pub correct_letter_count: u64,
    pub wrong_letter_count: u64,
    pub no_wrong_letters_count: u64,
    pub helpers_count: BTreeMap<HelperKind, u64>,
}

impl Statistics {
    pub fn helper_count(&self, kind: HelperKind) -> u64 {
        self.helpers_count.get(&kind).copied().unwrap_or(0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("select a language first")]
    NoLanguage,
    #[error("select a difficulty first")]
    NoDifficulty,
    #[error("no words available for the selected categories")]
    NoWords,
    #[error("a game is already running")]
    AlreadyPlaying,
    #[error("the game is not being played")]
    NotPlaying,
    #[error("the game is not paused")]
    NotPaused,
    #[error("there is no round in progress")]
    NoRound,
    #[error("the round is already over")]
    RoundFinished,
    #[error("'{0}' is not a letter of the board")]
    InvalidLetter(char),
    #[error("letter '{0}' was already used")]
    LetterUsed(char),
    #[error("no uses left")]
    HelperExhausted(HelperKind),
    #[error("nothing left to reveal or discard")]
    NothingLeft(HelperKind),
}

/// Operations and read accessors the session needs from a game engine.
pub trait GameEngine {
    /// `None` when the engine holds no session state at all.
    fn status(&self) -> Option<GameStatus>;

    fn languages(&self) -> Vec<String>;
    fn language(&self) -> Option<&str>;
    /// `None` clears the selection.
    fn set_language(&mut self, language: Option<&str>) -> Result<(), EngineError>;

    fn available_categories(&self) -> Vec<String>;
    fn selected_categories(&self) -> Vec<String>;
    fn add_category(&mut self, category: &str) -> Result<(), EngineError>;
    fn remove_category(&mut self, category: &str);
    /// Words matching the current language and categories.
    fn available_words(&self) -> usize;

    fn difficulty(&self) -> Option<Difficulty>;
    fn set_difficulty(&mut self, difficulty: Difficulty);

    /// Letters of the board for the current language, in display order.
    fn alphabet(&self) -> Vec<char>;
    fn config(&self) -> Option<GameConfig>;
    fn round(&self) -> Option<RoundView>;
    fn statistics(&self) -> Option<&Statistics>;

    fn play(&mut self) -> Result<(), EngineError>;
    fn pause(&mut self) -> Result<(), EngineError>;
    fn resume(&mut self) -> Result<(), EngineError>;
    fn next(&mut self) -> Result<(), EngineError>;
    fn finish(&mut self);

    /// Returns whether the letter is part of the word.
    fn prove_letter(&mut self, letter: char) -> Result<bool, EngineError>;
    fn use_helper(&mut self, kind: HelperKind) -> Result<(), EngineError>;
}
