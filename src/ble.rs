use crate::ErrorCode;

/// Control over wireless profile selection and bond storage.
///
/// Implemented by the radio stack glue of the embedding firmware.
pub trait ProfileControl {
    /// Activate the profile slot with the given index.
    fn select_profile(&mut self, profile: u8) -> Result<(), ErrorCode>;

    /// Remove the stored bonds of the active profile.
    ///
    /// The radio stack reports no failure for this operation.
    fn clear_bonds(&mut self);
}
