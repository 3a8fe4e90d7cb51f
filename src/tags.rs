//! Closed tag inventories of the CATiB annotation scheme

use serde::{Deserialize, Serialize};

/// Coarse CATiB part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatibTag {
    Nom,
    Prop,
    Vrb,
    VrbPass,
    Pnx,
    Prt,
    Foreign,
}

impl CatibTag {
    pub const ALL: [CatibTag; 7] = [
        CatibTag::Nom,
        CatibTag::Prop,
        CatibTag::Vrb,
        CatibTag::VrbPass,
        CatibTag::Pnx,
        CatibTag::Prt,
        CatibTag::Foreign,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatibTag::Nom => "NOM",
            CatibTag::Prop => "PROP",
            CatibTag::Vrb => "VRB",
            CatibTag::VrbPass => "VRB-PASS",
            CatibTag::Pnx => "PNX",
            CatibTag::Prt => "PRT",
            CatibTag::Foreign => "FOREIGN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        CatibTag::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Tag used when comparing syntactic patterns: proper nouns and foreign
    /// words behave as nominals, passive verbs as verbs
    pub fn pattern_class(&self) -> CatibTag {
        match self {
            CatibTag::Prop | CatibTag::Foreign => CatibTag::Nom,
            CatibTag::VrbPass => CatibTag::Vrb,
            other => *other,
        }
    }
}

/// CATiB dependency relation labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeprelLabel {
    Sbj,
    Obj,
    Tpc,
    Prd,
    Idf,
    Tmz,
    Mod,
    Flat,
}

impl DeprelLabel {
    pub const ALL: [DeprelLabel; 8] = [
        DeprelLabel::Sbj,
        DeprelLabel::Obj,
        DeprelLabel::Tpc,
        DeprelLabel::Prd,
        DeprelLabel::Idf,
        DeprelLabel::Tmz,
        DeprelLabel::Mod,
        DeprelLabel::Flat,
    ];

    /// Labels a head may carry on at most one dependent
    pub const SINGLE: [DeprelLabel; 5] = [
        DeprelLabel::Idf,
        DeprelLabel::Tpc,
        DeprelLabel::Sbj,
        DeprelLabel::Tmz,
        DeprelLabel::Prd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeprelLabel::Sbj => "SBJ",
            DeprelLabel::Obj => "OBJ",
            DeprelLabel::Tpc => "TPC",
            DeprelLabel::Prd => "PRD",
            DeprelLabel::Idf => "IDF",
            DeprelLabel::Tmz => "TMZ",
            DeprelLabel::Mod => "MOD",
            DeprelLabel::Flat => "---",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        DeprelLabel::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

/// Surface order of a head and its dependent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Parent precedes child
    #[serde(rename = "P-C")]
    ParentChild,
    /// Child precedes parent
    #[serde(rename = "C-P")]
    ChildParent,
}

impl Direction {
    /// Direction of the arc from `parent_id` to `child_id`. The virtual root
    /// (id 0) always precedes.
    pub fn of(parent_id: usize, child_id: usize) -> Self {
        if parent_id < child_id {
            Direction::ParentChild
        } else {
            Direction::ChildParent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ParentChild => "P-C",
            Direction::ChildParent => "C-P",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "P-C" => Some(Direction::ParentChild),
            "C-P" => Some(Direction::ChildParent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
