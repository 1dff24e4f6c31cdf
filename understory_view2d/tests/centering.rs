// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Centering properties for `understory_view2d`.

use kurbo::{Point, Rect, Vec2};
use proptest::prelude::*;
use understory_view2d::{
    CenterContext, CenterMode, CenteringConfig, CenteringController, ControllerState,
    MemoryViewStore, ViewStore, Viewport2D,
};

fn arb_target() -> impl Strategy<Value = Rect> {
    (-5000.0..5000.0_f64, -5000.0..5000.0_f64, 10.0..400.0_f64, 10.0..400.0_f64)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
}

proptest! {
    #[test]
    fn centering_lands_within_a_pixel(
        target in arb_target(),
        zoom in 0.1..4.0_f64,
        pan in (-300.0..300.0_f64, -300.0..300.0_f64),
        animated in any::<bool>(),
    ) {
        let mut vp = Viewport2D::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
        vp.pan_by_view(Vec2::new(pan.0, pan.1));
        vp.zoom_about_view_point(Point::new(640.0, 360.0), zoom);
        let scale = vp.zoom();
        let mut ctl = CenteringController::new(vp, CenteringConfig::default());

        let mode = if animated {
            CenterMode::Animated(CenterContext::Split)
        } else {
            CenterMode::Immediate
        };
        let outcome = ctl.center_on(Some(target), mode, 1_000);
        if !outcome.is_finished() {
            prop_assert!(ctl.tick(1_000 + 750));
        }

        let on_screen = ctl.viewport().world_to_view_point(target.center());
        prop_assert!((on_screen - Point::new(640.0, 360.0)).hypot() < 1.0);
        prop_assert_eq!(ctl.viewport().zoom(), scale);
        prop_assert_eq!(ctl.state(), ControllerState::Idle);
    }
}

#[test]
fn store_round_trip_restores_view() {
    let mut ctl = CenteringController::new(
        Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0)),
        CenteringConfig::default(),
    );
    ctl.center_on(
        Some(Rect::new(50.0, 50.0, 290.0, 170.0)),
        CenterMode::Immediate,
        0,
    );
    let mut store = MemoryViewStore::default();
    store.save(&ctl.transform());
    assert_eq!(store.saves(), 1);

    let mut fresh = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    assert!(fresh.set_transform(store.load().unwrap()));
    assert_eq!(fresh.transform(), ctl.transform());
}
