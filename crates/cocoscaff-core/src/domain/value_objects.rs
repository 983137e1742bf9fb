//! Domain value objects: FieldName, HdlLanguage, Simulator.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each one carries its string representation and a `FromStr` parser.
//! Validation rules that reference them live in `field.rs`.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add it to the `ALL` table, the `as_str` arm and the `FromStr` arm
//! 3. Done, option lists and rules pick it up from `ALL`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── FieldName ────────────────────────────────────────────────────────────────

/// Key of one form field.
///
/// The key doubles as the placeholder name inside substitutable template
/// files: `{dut_module}` is replaced with the value of [`FieldName::DutModule`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    ProjectName,
    ParentFolder,
    DutFile,
    TestProc,
    DutModule,
    ToplevelLang,
    CompileArgs,
    Simulator,
    SimArgs,
    Waves,
}

impl FieldName {
    /// Every field, in form display order.
    pub const ALL: [FieldName; 10] = [
        Self::ProjectName,
        Self::ParentFolder,
        Self::DutFile,
        Self::TestProc,
        Self::DutModule,
        Self::ToplevelLang,
        Self::CompileArgs,
        Self::Simulator,
        Self::SimArgs,
        Self::Waves,
    ];

    /// Placeholder key, e.g. `"test_proc"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectName => "project_name",
            Self::ParentFolder => "parent_folder",
            Self::DutFile => "dut_file",
            Self::TestProc => "test_proc",
            Self::DutModule => "dut_module",
            Self::ToplevelLang => "toplevel_lang",
            Self::CompileArgs => "compile_args",
            Self::Simulator => "simulator",
            Self::SimArgs => "sim_args",
            Self::Waves => "waves",
        }
    }

    /// Human label shown next to the input.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ProjectName => "Project Name",
            Self::ParentFolder => "Parent Folder",
            Self::DutFile => "DUT File",
            Self::TestProc => "Test Proc",
            Self::DutModule => "DUT module",
            Self::ToplevelLang => "HW Language",
            Self::CompileArgs => "Compile args",
            Self::Simulator => "Simulator",
            Self::SimArgs => "Simulation arguments",
            Self::Waves => "Waveform",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DomainError::UnknownField {
                field: s.to_string(),
            })
    }
}

// ── HdlLanguage ──────────────────────────────────────────────────────────────

/// Top-level hardware description language of the DUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HdlLanguage {
    /// Verilog and SystemVerilog share the `verilog` tag.
    Verilog,
    Vhdl,
}

impl HdlLanguage {
    pub const ALL: [HdlLanguage; 2] = [Self::Verilog, Self::Vhdl];

    /// Tag written into the generated build file (`TOPLEVEL_LANG`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Verilog => "verilog",
            Self::Vhdl => "vhdl",
        }
    }

    /// Option label presented to the user.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Verilog => "Verilog/SystemVerilog",
            Self::Vhdl => "VHDL",
        }
    }
}

impl fmt::Display for HdlLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HdlLanguage {
    type Err = DomainError;

    /// Accepts either the tag (`verilog`) or the label (`Verilog/SystemVerilog`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verilog" | "systemverilog" | "sv" | "verilog/systemverilog" => Ok(Self::Verilog),
            "vhdl" => Ok(Self::Vhdl),
            other => Err(DomainError::UnknownOption {
                field: FieldName::ToplevelLang.as_str(),
                value: other.to_string(),
            }),
        }
    }
}

// ── Simulator ────────────────────────────────────────────────────────────────

/// Simulators supported by the generated build file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Simulator {
    Icarus,
    ActiveHdl,
    Coverage,
    Cvc,
    Ghdl,
    Ius,
    Modelsim,
    Nvc,
    Questa,
    Riviera,
    Vcs,
    Verilator,
    Xcelium,
}

impl Simulator {
    /// Closed list, in the order offered to the user.
    pub const ALL: [Simulator; 13] = [
        Self::Icarus,
        Self::ActiveHdl,
        Self::Coverage,
        Self::Cvc,
        Self::Ghdl,
        Self::Ius,
        Self::Modelsim,
        Self::Nvc,
        Self::Questa,
        Self::Riviera,
        Self::Vcs,
        Self::Verilator,
        Self::Xcelium,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Icarus => "icarus",
            Self::ActiveHdl => "activehdl",
            Self::Coverage => "coverage",
            Self::Cvc => "cvc",
            Self::Ghdl => "ghdl",
            Self::Ius => "ius",
            Self::Modelsim => "modelsim",
            Self::Nvc => "nvc",
            Self::Questa => "questa",
            Self::Riviera => "riviera",
            Self::Vcs => "vcs",
            Self::Verilator => "verilator",
            Self::Xcelium => "xcelium",
        }
    }
}

impl fmt::Display for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Simulator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|sim| sim.as_str() == lower)
            .ok_or(DomainError::UnknownOption {
                field: FieldName::Simulator.as_str(),
                value: lower,
            })
    }
}
