#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Assay {
    C282Y,
    H63D,
}

impl Assay {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "C282Y" => Some(Assay::C282Y),
            "H63D" => Some(Assay::H63D),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Assay::C282Y => "C282Y",
            Assay::H63D => "H63D",
        }
    }
}

/// Genotype call as reported by the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    WtWt,
    WtMut,
    MutMut,
    NoAmp,
    NoCall,
    Other,
}

impl Call {
    pub fn parse(value: &str) -> Self {
        match value {
            "WTWT" => Call::WtWt,
            "WTMUT" => Call::WtMut,
            "MUTMUT" => Call::MutMut,
            "NOAMP" => Call::NoAmp,
            "" => Call::NoCall,
            _ => Call::Other,
        }
    }

    /// Genotype state wording; `None` means inconclusive.
    pub fn state(self) -> Option<&'static str> {
        match self {
            Call::WtWt => Some("negative"),
            Call::WtMut => Some("het"),
            Call::MutMut => Some("homo"),
            Call::NoAmp => Some("NO AMP"),
            Call::NoCall | Call::Other => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/assay.rs"]
mod tests;
