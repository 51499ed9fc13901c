use crate::model::region::Region;

/// Rendering collaborator notified about region changes on the displayed asset.
///
/// There is one visual primitive per region id on the asset being shown.
pub trait RegionSurface {
    /// A region appeared.
    fn add_region(&mut self, region: &Region);
    /// A region's geometry or tags changed.
    fn update_region(&mut self, region: &Region);
    /// A region disappeared.
    fn delete_region(&mut self, region_id: &str);
    /// A region was locked or unlocked.
    fn set_locked(&mut self, region_id: &str, locked: bool);
    /// A region was hidden or shown.
    fn set_hidden(&mut self, region_id: &str, hidden: bool);
}

/// Surface that ignores every call; for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl RegionSurface for NullSurface {
    fn add_region(&mut self, _region: &Region) {}
    fn update_region(&mut self, _region: &Region) {}
    fn delete_region(&mut self, _region_id: &str) {}
    fn set_locked(&mut self, _region_id: &str, _locked: bool) {}
    fn set_hidden(&mut self, _region_id: &str, _hidden: bool) {}
}
