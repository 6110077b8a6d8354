use std::fmt;

/// Linear install state machine. Stages only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstallStage {
    Init,
    Validating,
    Verifying,
    ReadingMetadata,
    CheckingDependencies,
    Installing,
    Configuring,
    Finalizing,
    Done,
}

impl InstallStage {
    pub const ALL: [InstallStage; 9] = [
        Self::Init,
        Self::Validating,
        Self::Verifying,
        Self::ReadingMetadata,
        Self::CheckingDependencies,
        Self::Installing,
        Self::Configuring,
        Self::Finalizing,
        Self::Done,
    ];

    /// Overall progress reported when the stage is entered.
    pub fn percent(self) -> u8 {
        match self {
            Self::Init => 5,
            Self::Validating => 15,
            Self::Verifying => 25,
            Self::ReadingMetadata => 40,
            Self::CheckingDependencies => 50,
            Self::Installing => 60,
            Self::Configuring => 85,
            Self::Finalizing => 95,
            Self::Done => 100,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Init => "Initializing installation process...",
            Self::Validating => "Validating package file...",
            Self::Verifying => "Verifying package security...",
            Self::ReadingMetadata => "Reading package metadata...",
            Self::CheckingDependencies => "Checking dependencies...",
            Self::Installing => "Installing package...",
            Self::Configuring => "Configuring installation...",
            Self::Finalizing => "Finalizing installation...",
            Self::Done => "Installation completed successfully!",
        }
    }
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Progress reported once validation or verification has passed.
pub(super) const VALIDATED_PERCENT: u8 = 20;
pub(super) const VERIFIED_PERCENT: u8 = 35;
