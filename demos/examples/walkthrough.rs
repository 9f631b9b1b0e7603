// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full pager session: registration, gestures, and live mutation.
//!
//! This example shows how to combine:
//! - `flipbook_pager` for navigation and batched-update reconciliation,
//! - `flipbook_reuse` lifecycle counting to watch recycling at work,
//! - `flipbook_transition` pan samples standing in for a gesture recognizer.
//!
//! Run:
//! - `cargo run -p flipbook_demos --example walkthrough`

use flipbook_demos::{Event, RecordingDelegate, counting_pager};
use flipbook_pager::PanSample;
use kurbo::Vec2;

fn main() {
    let (mut pager, tally) = counting_pager(&[1, 2, 3, 4, 5]);
    let mut delegate = RecordingDelegate::default();

    // Present the default page.
    pager.reload(&mut delegate).expect("factory is registered");
    println!("active after reload: {:?}", pager.active_item());

    // Swipe forward and commit: 120 of 320 units is past the 0.3 ratio.
    let drag = PanSample::new(Vec2::new(-120.0, 0.0), Vec2::new(-40.0, 0.0));
    pager.update_gesture(drag, &mut delegate).expect("gesture");
    if let Some(decision) = pager.end_gesture(drag, &mut delegate) {
        println!(
            "release: {:?} (animate for {:?}s)",
            decision.mode,
            pager.suggested_duration(-40.0)
        );
    }
    pager.finish_animation(&mut delegate).expect("reconcile");
    println!("active after swipe: {:?}", pager.active_item());

    // A half-hearted swipe snaps back.
    let nudge = PanSample::new(Vec2::new(-30.0, 0.0), Vec2::ZERO);
    pager.update_gesture(nudge, &mut delegate).expect("gesture");
    let decision = pager.end_gesture(nudge, &mut delegate);
    pager.finish_animation(&mut delegate).expect("reconcile");
    println!("nudge decided {:?}, still on {:?}", decision, pager.active_item());

    // Jump programmatically, then delete the active page out from under the
    // pager inside an update scope.
    pager
        .set_active_item(&5, false, &mut delegate)
        .expect("page 5 exists");
    pager
        .mutate(&mut delegate, |list| {
            list.remove_item(&5);
        })
        .expect("reconcile");
    println!("active after removing page 5: {:?}", pager.active_item());

    println!("\ndelegate saw:");
    for event in &delegate.events {
        match event {
            Event::WillTransition(adapter) => println!("  will-transition -> {adapter:?}"),
            Event::DidFinish {
                finished,
                previous,
                completed,
            } => println!(
                "  did-finish finished={finished} previous={previous:?} completed={completed}"
            ),
            Event::Indicator { count, position } => {
                println!("  indicator count={count:?} position={position:?}");
            }
        }
    }

    println!(
        "\nlifecycle: created={} prepared={} configured={}",
        tally.created(),
        tally.prepared(),
        tally.configured()
    );
}
