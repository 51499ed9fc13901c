use super::*;
use crate::foundation::core::BoundingBox;

#[test]
fn promotion_table_cross_product() {
    use AssetState::*;

    // (current, has tagged regions, all tracked or editted, next)
    let rows = [
        (NotVisited, false, false, NotVisited),
        (NotVisited, false, true, NotVisited),
        (NotVisited, true, false, Sample),
        (NotVisited, true, true, Tracked),
        (Store, false, false, Store),
        (Store, false, true, Store),
        (Store, true, false, Sample),
        (Store, true, true, Sample),
        (Freeze, false, false, Freeze),
        (Freeze, false, true, Freeze),
        (Freeze, true, false, Sample),
        (Freeze, true, true, Sample),
        (FreezeStore, false, false, FreezeStore),
        (FreezeStore, false, true, FreezeStore),
        (FreezeStore, true, false, Sample),
        (FreezeStore, true, true, Sample),
        (Sample, false, false, NotVisited),
        (Sample, false, true, NotVisited),
        (Sample, true, false, Sample),
        (Sample, true, true, Sample),
        (Tracked, false, false, NotVisited),
        (Tracked, false, true, NotVisited),
        (Tracked, true, false, Tracked),
        (Tracked, true, true, Tracked),
        (Interpolated, false, false, NotVisited),
        (Interpolated, false, true, NotVisited),
        (Interpolated, true, false, Interpolated),
        (Interpolated, true, true, Tracked),
    ];

    for current in AssetState::ALL {
        assert_eq!(rows.iter().filter(|row| row.0 == current).count(), 4);
    }
    for (current, tagged, all_tracked, next) in rows {
        assert_eq!(
            next_asset_state(current, tagged, all_tracked),
            next,
            "{current:?} tagged={tagged} all_tracked={all_tracked}"
        );
    }
}

#[test]
fn tagged_assets_never_stay_stored_or_frozen() {
    for current in [
        AssetState::Store,
        AssetState::Freeze,
        AssetState::FreezeStore,
    ] {
        for all_tracked in [false, true] {
            assert_eq!(
                next_asset_state(current, true, all_tracked),
                AssetState::Sample
            );
        }
    }
}

fn region(state: RegionState) -> Region {
    Region::rectangle(vec!["t".into()], BoundingBox::new(0.0, 0.0, 1.0, 1.0)).with_state(state)
}

#[test]
fn derives_from_region_lists() {
    assert_eq!(
        next_asset_state_for(AssetState::NotVisited, &[]),
        AssetState::NotVisited
    );
    assert_eq!(
        next_asset_state_for(
            AssetState::NotVisited,
            &[region(RegionState::Tracked), region(RegionState::Editted)]
        ),
        AssetState::Tracked
    );
    assert_eq!(
        next_asset_state_for(
            AssetState::NotVisited,
            &[region(RegionState::Tracked), region(RegionState::Inputted)]
        ),
        AssetState::Sample
    );
    assert_eq!(
        next_asset_state_for(AssetState::Sample, &[]),
        AssetState::NotVisited
    );
}

#[test]
fn counts_polygon_and_polyline_inputs() {
    let regions = [
        region(RegionState::PolygonInputted),
        region(RegionState::PolygonInputted),
        region(RegionState::PolylineInputted),
        region(RegionState::Inputted),
    ];
    assert_eq!(shape_counts(&regions), (2, 1));
    assert_eq!(shape_counts(&[]), (0, 0));
}
