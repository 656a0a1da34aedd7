//! Grade point and letter mapping.
//!
//! | Total marks | Grade point | Letter |
//! |-------------|-------------|--------|
//! | >= 90       | 10          | S      |
//! | >= 80       | 9           | A+     |
//! | >= 70       | 8           | A      |
//! | >= 60       | 7           | B+     |
//! | >= 50       | 6           | B      |
//! | >= 40       | 5           | C      |
//! | < 40        | 0           | F      |
//!
//! There are no grade points between 1 and 4.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Map a 0–100 total score to its grade point.
pub fn grade_point(total_score: f64) -> u8 {
    match total_score {
        t if t >= 90.0 => 10,
        t if t >= 80.0 => 9,
        t if t >= 70.0 => 8,
        t if t >= 60.0 => 7,
        t if t >= 50.0 => 6,
        t if t >= 40.0 => 5,
        _ => 0,
    }
}

/// Map a grade point to its letter. Anything off the scale is an `F`.
pub fn grade_letter(grade_point: u8) -> Grade {
    match grade_point {
        10 => Grade::S,
        9 => Grade::APlus,
        8 => Grade::A,
        7 => Grade::BPlus,
        6 => Grade::B,
        5 => Grade::C,
        _ => Grade::F,
    }
}

/// Letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// The grade point this letter stands for.
    pub fn grade_point(self) -> u8 {
        match self {
            Grade::S => 10,
            Grade::APlus => 9,
            Grade::A => 8,
            Grade::BPlus => 7,
            Grade::B => 6,
            Grade::C => 5,
            Grade::F => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the printed grade scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBand {
    pub grade: Grade,
    /// Lowest total that earns this grade.
    pub min_total: u8,
    /// Human-readable marks range.
    pub marks: &'static str,
}

/// Reference scale, best grade first.
pub const GRADE_SCALE: [GradeBand; 7] = [
    GradeBand {
        grade: Grade::S,
        min_total: 90,
        marks: "90-100",
    },
    GradeBand {
        grade: Grade::APlus,
        min_total: 80,
        marks: "80-89",
    },
    GradeBand {
        grade: Grade::A,
        min_total: 70,
        marks: "70-79",
    },
    GradeBand {
        grade: Grade::BPlus,
        min_total: 60,
        marks: "60-69",
    },
    GradeBand {
        grade: Grade::B,
        min_total: 50,
        marks: "50-59",
    },
    GradeBand {
        grade: Grade::C,
        min_total: 40,
        marks: "40-49",
    },
    GradeBand {
        grade: Grade::F,
        min_total: 0,
        marks: "<40",
    },
];
