//! Fixed viewer privilege

use calembed_core::PrivilegeCheck;

/// [`PrivilegeCheck`] with a privilege decided up front
///
/// Hosts resolve the viewer's capabilities per request and pass one of these
/// to `EventPipeline::run_as`; the pipeline itself is built once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticPrivilege {
    privileged: bool,
}

impl StaticPrivilege {
    pub fn new(privileged: bool) -> Self {
        Self { privileged }
    }

    pub fn public() -> Self {
        Self::new(false)
    }

    pub fn privileged() -> Self {
        Self::new(true)
    }
}

impl PrivilegeCheck for StaticPrivilege {
    fn is_privileged_viewer(&self) -> bool {
        self.privileged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_configured_privilege() {
        assert!(!StaticPrivilege::default().is_privileged_viewer());
        assert!(!StaticPrivilege::public().is_privileged_viewer());
        assert!(StaticPrivilege::privileged().is_privileged_viewer());
    }
}
