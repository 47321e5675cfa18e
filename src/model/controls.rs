use crate::model::assay::{Assay, Call};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlSample {
    Na13591,
    Na14640,
    Na14691,
    Ntc,
}

impl ControlSample {
    pub fn parse(sample_id: &str) -> Option<Self> {
        match sample_id {
            "NA13591" => Some(ControlSample::Na13591),
            "NA14640" => Some(ControlSample::Na14640),
            "NA14691" => Some(ControlSample::Na14691),
            "NTC" => Some(ControlSample::Ntc),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ControlSample::Na13591 => "NA13591",
            ControlSample::Na14640 => "NA14640",
            ControlSample::Na14691 => "NA14691",
            ControlSample::Ntc => "NTC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ControlExpectation {
    pub sample: ControlSample,
    pub assay: Assay,
    pub expected: Call,
    /// A matching call produces an empty message instead of "passed".
    pub silent_on_pass: bool,
}

const CONTROL_TABLE: &[ControlExpectation] = &[
    ControlExpectation {
        sample: ControlSample::Na13591,
        assay: Assay::H63D,
        expected: Call::MutMut,
        silent_on_pass: true,
    },
    ControlExpectation {
        sample: ControlSample::Na13591,
        assay: Assay::C282Y,
        expected: Call::WtWt,
        silent_on_pass: false,
    },
    ControlExpectation {
        sample: ControlSample::Na14640,
        assay: Assay::H63D,
        expected: Call::WtWt,
        silent_on_pass: true,
    },
    ControlExpectation {
        sample: ControlSample::Na14640,
        assay: Assay::C282Y,
        expected: Call::MutMut,
        silent_on_pass: false,
    },
    ControlExpectation {
        sample: ControlSample::Na14691,
        assay: Assay::H63D,
        expected: Call::WtMut,
        silent_on_pass: true,
    },
    ControlExpectation {
        sample: ControlSample::Na14691,
        assay: Assay::C282Y,
        expected: Call::WtMut,
        silent_on_pass: false,
    },
    ControlExpectation {
        sample: ControlSample::Ntc,
        assay: Assay::H63D,
        expected: Call::NoCall,
        silent_on_pass: true,
    },
    ControlExpectation {
        sample: ControlSample::Ntc,
        assay: Assay::C282Y,
        expected: Call::NoCall,
        silent_on_pass: false,
    },
];

pub fn control_table() -> &'static [ControlExpectation] {
    CONTROL_TABLE
}

pub fn expectation(sample: ControlSample, assay: Assay) -> Option<&'static ControlExpectation> {
    control_table()
        .iter()
        .find(|e| e.sample == sample && e.assay == assay)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/controls.rs"]
mod tests;
