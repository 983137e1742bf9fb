//! Form field definitions.
//!
//! [`FormSchema::cocotb`] is the static catalog of the ten fields the
//! scaffolder asks for, with the exact pattern/length/path rules each one
//! carries. Schemas are built once when the form opens and never change
//! afterwards, apart from overriding defaults before the form is shown.

use std::path::Path;

use crate::domain::{
    error::DomainError,
    rules::{Outcome, Rule, RuleContext, validate},
    value_objects::{FieldName, HdlLanguage, Simulator},
};

pub const NAME_PATTERN: &str = r"^[a-zA-Z0-9_]+$";
pub const FOLDER_PATTERN: &str = r"^[a-zA-Z0-9_ /]+$";
pub const DUT_FILE_PATTERN: &str = r"^[a-zA-Z0-9_]+\.(v|sv|vhdl)$";

const MSG_NAME_CHARS: &str = "Only alphanumeric characters and underscores are allowed.";

/// Static description of one input.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: FieldName,
    pub default: String,
    pub rules: Vec<Rule>,
    /// Optional fields accept an empty value without running their rules.
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: FieldName, default: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name,
            default: default.into(),
            rules,
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn validate(&self, value: &str, ctx: &RuleContext<'_>) -> Outcome {
        if !self.required && value.is_empty() {
            return Outcome::Accepted;
        }
        validate(value, &self.rules, ctx)
    }
}

/// Ordered set of fields making up the form.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    /// The cocotb project form.
    pub fn cocotb() -> Result<Self, DomainError> {
        let fields = vec![
            FieldSpec::new(
                FieldName::ProjectName,
                "",
                vec![
                    Rule::pattern(NAME_PATTERN, MSG_NAME_CHARS)?,
                    Rule::length(1, 64, "Project name must be between 1 and 64 characters."),
                    Rule::PathAbsent,
                ],
            ),
            FieldSpec::new(
                FieldName::ParentFolder,
                "",
                vec![
                    Rule::pattern(
                        FOLDER_PATTERN,
                        "Only alphanumeric characters, underscores, spaces and slashes are allowed.",
                    )?,
                    Rule::length(
                        1,
                        1024,
                        "Project folder must be between 1 and 1024 characters.",
                    ),
                    Rule::PathPresent,
                ],
            ),
            FieldSpec::new(
                FieldName::DutFile,
                "dut.sv",
                vec![
                    Rule::pattern(
                        DUT_FILE_PATTERN,
                        "DUT file must be an alphanumeric/underscore name with a .v, .sv or .vhdl extension.",
                    )?,
                    Rule::length(
                        1,
                        64,
                        "DUT name must be between 1 and 64 characters including file extension.",
                    ),
                ],
            ),
            FieldSpec::new(
                FieldName::TestProc,
                "test_proc",
                vec![
                    Rule::pattern(NAME_PATTERN, MSG_NAME_CHARS)?,
                    Rule::length(
                        1,
                        64,
                        "Test procedure name must be between 1 and 64 characters.",
                    ),
                ],
            ),
            FieldSpec::new(
                FieldName::DutModule,
                "dut",
                vec![
                    Rule::pattern(NAME_PATTERN, MSG_NAME_CHARS)?,
                    Rule::length(1, 64, "DUT module name must be between 1 and 64 characters."),
                ],
            ),
            FieldSpec::new(
                FieldName::ToplevelLang,
                HdlLanguage::Verilog.as_str(),
                vec![Rule::one_of(
                    HdlLanguage::ALL.map(|l| l.as_str()),
                    "HW language must be 'verilog' or 'vhdl'.",
                )],
            ),
            FieldSpec::new(FieldName::CompileArgs, "", Vec::new()).optional(),
            FieldSpec::new(
                FieldName::Simulator,
                Simulator::Icarus.as_str(),
                vec![Rule::one_of(
                    Simulator::ALL.map(|s| s.as_str()),
                    "Unsupported simulator.",
                )],
            ),
            FieldSpec::new(FieldName::SimArgs, "", Vec::new()).optional(),
            FieldSpec::new(
                FieldName::Waves,
                "1",
                vec![Rule::one_of(["0", "1"], "Waveform flag must be 0 or 1.")],
            ),
        ];

        Ok(Self { fields })
    }

    /// Replace the default of one field.
    pub fn with_default(mut self, name: FieldName, value: impl Into<String>) -> Self {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.default = value.into();
        }
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: FieldName) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate one field, resolving path rules the way the form does:
    /// the project name is checked as a child of `parent_folder`.
    pub fn validate_field(
        &self,
        name: FieldName,
        value: &str,
        parent_folder: &str,
        ctx: RuleContext<'_>,
    ) -> Result<Outcome, DomainError> {
        let spec = self.get(name).ok_or_else(|| DomainError::UnknownField {
            field: name.as_str().to_string(),
        })?;
        let ctx = if name == FieldName::ProjectName {
            ctx.with_base(Path::new(parent_folder))
        } else {
            ctx
        };
        Ok(spec.validate(value, &ctx))
    }
}
