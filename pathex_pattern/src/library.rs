//! Reusable pattern templates.
//!
//! Templates are built incrementally: each constraint narrows the candidate
//! bindings and may introduce the next variable, so constraint order is both
//! the binding order and the join order of the search.

use pathex_core::CapabilityRegistry;
use pathex_core::model::NodeKind;

use crate::constraint::{ChangeType, Constraint, RelType};
use crate::error::Result;
use crate::pattern::Pattern;

/// Variable labels used by the library patterns.
pub mod labels {
    pub const CONTROLLER_ER: &str = "controller ER";
    pub const GENERIC_CONTROLLER_ER: &str = "generic controller ER";
    pub const CONTROLLER_SIMPLE_PE: &str = "controller simple PE";
    pub const CONTROLLER_PE: &str = "controller PE";
    pub const CONTROL: &str = "Control";
    pub const CONVERSION: &str = "Conversion";
    pub const INPUT_PE: &str = "input PE";
    pub const INPUT_SIMPLE_PE: &str = "input simple PE";
    pub const OUTPUT_PE: &str = "output PE";
    pub const OUTPUT_SIMPLE_PE: &str = "output simple PE";
    pub const CHANGED_GENERIC_ER: &str = "changed generic ER";
    pub const CHANGED_ER: &str = "changed ER";

    pub const PROTEIN_1: &str = "Protein 1";
    pub const PROTEIN_2: &str = "Protein 2";
    pub const SIMPLE_PE_1: &str = "SPE1";
    pub const SIMPLE_PE_2: &str = "SPE2";
    pub const PE_1: &str = "PE1";
    pub const PE_2: &str = "PE2";
    pub const COMPLEX: &str = "Complex";
}

/// Library name of [`in_complex_with`].
pub const IN_COMPLEX_WITH: &str = "inComplexWith";
/// Library name of [`controls_state_change`].
pub const CONTROLS_STATE_CHANGE: &str = "controlsStateChange";

/// Filter term marking an active form of a protein.
pub const ACTIVE_FILTER: &str = "residue modification, active";

/// Two proteins that are members of the same complex.
pub fn in_complex_with() -> Result<Pattern> {
    use labels::{COMPLEX, PE_1, PE_2, PROTEIN_1, PROTEIN_2, SIMPLE_PE_1, SIMPLE_PE_2};

    let mut p = Pattern::new(IN_COMPLEX_WITH, NodeKind::ProteinReference, PROTEIN_1);
    p.add(Constraint::ErToPe, &[PROTEIN_1, SIMPLE_PE_1])?;
    p.add(Constraint::LinkToComplex, &[SIMPLE_PE_1, PE_1])?;
    p.add(Constraint::ComponentOf, &[PE_1, COMPLEX])?;
    p.add(Constraint::ComplexComponent, &[COMPLEX, PE_2])?;
    p.add(Constraint::Equality(false), &[PE_1, PE_2])?;
    p.add(Constraint::LinkToSpecific, &[PE_2, SIMPLE_PE_2])?;
    p.add(Constraint::PeToEr, &[SIMPLE_PE_2, PROTEIN_2])?;
    p.add(Constraint::Equality(false), &[PROTEIN_1, PROTEIN_2])?;
    p.add(Constraint::Type(NodeKind::ProteinReference), &[PROTEIN_2])?;
    Ok(p)
}

/// A protein controls a conversion that changes the state of another protein.
///
/// The search starts from protein references because the generic entity
/// reference kind has no instances of its own.
pub fn controls_state_change() -> Result<Pattern> {
    use labels::{
        CHANGED_ER, CHANGED_GENERIC_ER, CONTROL, CONTROLLER_ER, CONTROLLER_PE,
        CONTROLLER_SIMPLE_PE, CONVERSION, GENERIC_CONTROLLER_ER, INPUT_PE, INPUT_SIMPLE_PE,
        OUTPUT_PE, OUTPUT_SIMPLE_PE,
    };

    let mut p = Pattern::new(
        CONTROLS_STATE_CHANGE,
        NodeKind::ProteinReference,
        CONTROLLER_ER,
    );
    p.add(Constraint::LinkedEr { up: true }, &[CONTROLLER_ER, GENERIC_CONTROLLER_ER])?;
    p.add(Constraint::ErToPe, &[GENERIC_CONTROLLER_ER, CONTROLLER_SIMPLE_PE])?;
    p.add(Constraint::LinkToComplex, &[CONTROLLER_SIMPLE_PE, CONTROLLER_PE])?;
    p.add(Constraint::PeToControl, &[CONTROLLER_PE, CONTROL])?;
    p.add(Constraint::ControlToConv, &[CONTROL, CONVERSION])?;
    // The controller must not itself be converted by the reaction.
    p.add(Constraint::not(Constraint::ParticipantEr), &[CONVERSION, CONTROLLER_ER])?;
    p.add(
        Constraint::Participant {
            side: RelType::Input,
            treat_reversible_as_left_to_right: true,
        },
        &[CONTROL, CONVERSION, INPUT_PE],
    )?;
    p.add(Constraint::Type(NodeKind::Protein), &[INPUT_PE])?;
    p.add(Constraint::LinkToSpecific, &[INPUT_PE, INPUT_SIMPLE_PE])?;
    p.add(Constraint::PeToEr, &[INPUT_SIMPLE_PE, CHANGED_GENERIC_ER])?;
    p.add(Constraint::OtherSide, &[INPUT_PE, CONVERSION, OUTPUT_PE])?;
    p.add(Constraint::Equality(false), &[INPUT_PE, OUTPUT_PE])?;
    p.add(Constraint::Type(NodeKind::Protein), &[OUTPUT_PE])?;
    p.add(Constraint::LinkToSpecific, &[OUTPUT_PE, OUTPUT_SIMPLE_PE])?;
    p.add(Constraint::PeToEr, &[OUTPUT_SIMPLE_PE, CHANGED_GENERIC_ER])?;
    p.add(Constraint::LinkedEr { up: false }, &[CHANGED_GENERIC_ER, CHANGED_ER])?;
    p.add(Constraint::not(Constraint::LinkToSpecific), &[INPUT_PE, OUTPUT_SIMPLE_PE])?;
    p.add(Constraint::not(Constraint::LinkToSpecific), &[OUTPUT_PE, INPUT_SIMPLE_PE])?;
    Ok(p)
}

/// Require a modification gained (or lost) between the two simple states.
pub fn with_modification_change(
    mut pattern: Pattern,
    change: ChangeType,
    filter: &str,
) -> Result<Pattern> {
    pattern.add(
        Constraint::modification_change(change, filter),
        &[labels::INPUT_SIMPLE_PE, labels::OUTPUT_SIMPLE_PE],
    )?;
    Ok(pattern)
}

/// State change producing an active form of the converted protein.
pub fn activity_modification() -> Result<Pattern> {
    with_modification_change(controls_state_change()?, ChangeType::Gain, ACTIVE_FILTER)
        .map(|p| p.renamed("activityModification"))
}

/// Constructor of a named library pattern.
pub type PatternFactory = fn() -> Result<Pattern>;

/// Named pattern templates, looked up as capabilities.
#[derive(Debug, Default)]
pub struct PatternLibrary {
    registry: CapabilityRegistry<PatternFactory>,
}

impl PatternLibrary {
    /// An empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A library with the built-in templates registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        library.register(IN_COMPLEX_WITH, in_complex_with);
        library.register(CONTROLS_STATE_CHANGE, controls_state_change);
        library
    }

    pub fn register(&mut self, name: &str, factory: PatternFactory) {
        self.registry.register(name, factory);
    }

    pub fn unregister(&mut self, name: &str) {
        self.registry.unregister(name);
    }

    /// Build the named pattern; `None` when it is unavailable.
    pub fn get(&self, name: &str) -> Option<Result<Pattern>> {
        self.registry.resolve(name).map(|factory| factory())
    }

    /// Names requested but unavailable so far.
    #[must_use]
    pub fn unavailable(&self) -> Vec<String> {
        self.registry.unavailable()
    }
}
