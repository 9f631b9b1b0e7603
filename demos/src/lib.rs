// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demonstration harness for the flipbook crates.
//!
//! Provides a lifecycle-counting adapter ([`CountingCard`]) and a recording
//! delegate ([`RecordingDelegate`]) used to verify, end to end, how many
//! times adapters are constructed, prepared for reuse, and configured as a
//! pager navigates — the whole point of recycling is that these counts stay
//! small and predictable no matter how far the user pages.

use std::cell::Cell;
use std::rc::Rc;

use flipbook_pager::{
    AdapterId, PageList, Pager, PagerConfig, PagerDelegate,
};
use flipbook_reuse::Adapter;

/// Shared tally of adapter lifecycle callbacks.
#[derive(Clone, Debug, Default)]
pub struct LifecycleTally(Rc<TallyInner>);

#[derive(Debug, Default)]
struct TallyInner {
    created: Cell<u32>,
    prepared: Cell<u32>,
    configured: Cell<u32>,
}

impl LifecycleTally {
    /// Adapters constructed by the factory.
    #[must_use]
    pub fn created(&self) -> u32 {
        self.0.created.get()
    }

    /// Reuse preparations (idle adapter recycled for a new item).
    #[must_use]
    pub fn prepared(&self) -> u32 {
        self.0.prepared.get()
    }

    /// Configuration passes applied by the data source.
    #[must_use]
    pub fn configured(&self) -> u32 {
        self.0.configured.get()
    }

    fn bump(cell: &Cell<u32>) {
        cell.set(cell.get() + 1);
    }
}

/// A page adapter that counts its lifecycle callbacks.
#[derive(Debug)]
pub struct CountingCard {
    tally: LifecycleTally,
    /// The item this card currently displays.
    pub shown: Option<u32>,
}

impl Adapter for CountingCard {
    fn prepare_for_reuse(&mut self) {
        self.shown = None;
        LifecycleTally::bump(&self.tally.0.prepared);
    }
}

/// Everything a pager delegate can observe, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A transition began toward this adapter.
    WillTransition(AdapterId),
    /// A transition ended.
    DidFinish {
        /// Whether an animation ran to its end.
        finished: bool,
        /// The adapter active before the interaction.
        previous: Option<AdapterId>,
        /// Whether focus moved.
        completed: bool,
    },
    /// Page-indicator state changed.
    Indicator {
        /// Number of pages, when counted.
        count: Option<usize>,
        /// Active position.
        position: Option<usize>,
    },
}

/// A delegate that records every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    /// Notifications in arrival order.
    pub events: Vec<Event>,
}

impl PagerDelegate<u32> for RecordingDelegate {
    fn will_transition(&mut self, pending: AdapterId, _item: &u32) {
        self.events.push(Event::WillTransition(pending));
    }

    fn did_finish(&mut self, finished: bool, previous: Option<AdapterId>, completed: bool) {
        self.events.push(Event::DidFinish {
            finished,
            previous,
            completed,
        });
    }

    fn indicator_changed(&mut self, count: Option<usize>, position: Option<usize>) {
        self.events.push(Event::Indicator { count, position });
    }
}

/// Build a pager over `items` whose adapters report into the returned
/// tally.
pub fn counting_pager_with(
    items: &[u32],
    config: PagerConfig,
) -> (Pager<PageList<u32, CountingCard>>, LifecycleTally) {
    let tally = LifecycleTally::default();

    let configure_tally = tally.clone();
    let mut list = PageList::new("page", move |card: &mut CountingCard, item: &u32, _| {
        LifecycleTally::bump(&configure_tally.0.configured);
        card.shown = Some(*item);
    });
    list.extend(items.iter().copied());

    let mut pager = Pager::new(list, config);
    let factory_tally = tally.clone();
    pager.register("page", move || {
        LifecycleTally::bump(&factory_tally.0.created);
        CountingCard {
            tally: factory_tally.clone(),
            shown: None,
        }
    });
    (pager, tally)
}

/// [`counting_pager_with`] over a horizontal viewport of 320 host units.
pub fn counting_pager(items: &[u32]) -> (Pager<PageList<u32, CountingCard>>, LifecycleTally) {
    counting_pager_with(
        items,
        PagerConfig {
            viewport_extent: 320.0,
            ..PagerConfig::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_pager::{Mode, NoDelegate, PanSample, Provenance, ReuseId};
    use flipbook_transition::Orientation;
    use kurbo::Vec2;

    fn pan(tx: f64, vx: f64) -> PanSample {
        PanSample::new(Vec2::new(tx, 0.0), Vec2::new(vx, 0.0))
    }

    #[test]
    fn a_long_walk_constructs_exactly_two_adapters() {
        let (mut pager, tally) = counting_pager(&[1, 2, 3, 4, 5]);
        pager.reload(&mut NoDelegate).unwrap();
        assert_eq!(tally.created(), 1);

        for page in [2, 3, 4, 5, 4, 3, 2, 1] {
            pager.set_active_item(&page, false, &mut NoDelegate).unwrap();
        }

        // One adapter on screen, one in flight between pool and screen: the
        // walk length never matters.
        assert_eq!(tally.created(), 2);
        // Every move recycled the previously released card, except the
        // first (nothing idle yet) and the turn back to 4 (the idle card
        // still represented it and skipped reuse preparation).
        assert_eq!(tally.prepared(), 6);
        // One configuration per presentation: the reload plus eight moves.
        assert_eq!(tally.configured(), 9);
    }

    #[test]
    fn gestured_walks_keep_the_same_bound() {
        let (mut pager, tally) = counting_pager(&[1, 2, 3, 4]);
        pager.reload(&mut NoDelegate).unwrap();

        for _ in 0..3 {
            // Drag left far enough to commit (120 of 320 units ≈ 0.375).
            pager.update_gesture(pan(-120.0, 0.0), &mut NoDelegate).unwrap();
            let decision = pager.end_gesture(pan(-120.0, 0.0), &mut NoDelegate).unwrap();
            assert_eq!(decision.mode, Mode::Commit);
            pager.finish_animation(&mut NoDelegate).unwrap().unwrap();
        }

        assert_eq!(pager.active_item(), Some(&4));
        assert_eq!(tally.created(), 2);
    }

    #[test]
    fn notifications_arrive_in_order_with_the_right_payloads() {
        let (mut pager, _tally) = counting_pager(&[1, 2, 3]);
        let mut recording = RecordingDelegate::default();
        pager.reload(&mut recording).unwrap();

        let first = pager.active_adapter().unwrap();
        assert_eq!(
            recording.events.as_slice(),
            &[Event::Indicator {
                count: Some(3),
                position: Some(0),
            }]
        );
        recording.events.clear();

        // A committed gesture: will-transition, indicator at commit entry,
        // did-finish once the animation ends.
        pager.update_gesture(pan(-200.0, 0.0), &mut recording).unwrap();
        let candidate = pager.other_adapter().unwrap();
        pager.end_gesture(pan(-200.0, 0.0), &mut recording).unwrap();
        pager.finish_animation(&mut recording).unwrap().unwrap();

        assert_eq!(
            recording.events.as_slice(),
            &[
                Event::WillTransition(candidate),
                Event::Indicator {
                    count: Some(3),
                    position: Some(1),
                },
                Event::DidFinish {
                    finished: true,
                    previous: Some(first),
                    completed: true,
                },
            ]
        );
    }

    #[test]
    fn cancelled_gestures_report_an_incomplete_finish() {
        let (mut pager, _tally) = counting_pager(&[1, 2]);
        let mut recording = RecordingDelegate::default();
        pager.reload(&mut recording).unwrap();
        recording.events.clear();

        // 0.1 of the extent, no flick: the release snaps back.
        pager.update_gesture(pan(-32.0, 0.0), &mut recording).unwrap();
        let candidate = pager.other_adapter().unwrap();
        pager.end_gesture(pan(-32.0, 0.0), &mut recording).unwrap();
        pager.finish_animation(&mut recording).unwrap().unwrap();

        let active = pager.active_adapter();
        assert_eq!(
            recording.events.as_slice(),
            &[
                Event::WillTransition(candidate),
                Event::DidFinish {
                    finished: true,
                    previous: active,
                    completed: false,
                },
            ]
        );
        assert_eq!(pager.active_item(), Some(&1));
    }

    #[test]
    fn distinct_reuse_identifiers_pool_separately() {
        let (mut pager, tally) = counting_pager(&[1, 2, 3, 4]);
        // Odd pages are "covers" with their own pool and factory.
        pager.source_mut().set_reuse_id_fn(|item, _| {
            if item % 2 == 1 {
                ReuseId::new("cover")
            } else {
                ReuseId::new("page")
            }
        });
        let cover_tally = tally.clone();
        pager.register("cover", move || {
            LifecycleTally::bump(&cover_tally.0.created);
            CountingCard {
                tally: cover_tally.clone(),
                shown: None,
            }
        });

        pager.reload(&mut NoDelegate).unwrap();
        for page in [2, 3, 4, 1] {
            pager.set_active_item(&page, false, &mut NoDelegate).unwrap();
        }

        // The pools never exchange adapters: one cover cycles through the
        // odd pages, one page adapter through the even ones.
        let covers = pager.pool().idle_count(&"cover".into())
            + pager.pool().active_count(&"cover".into());
        let pages = pager.pool().idle_count(&"page".into())
            + pager.pool().active_count(&"page".into());
        assert_eq!(covers, 1);
        assert_eq!(pages, 1);
        assert_eq!(tally.created(), 2);
    }

    #[test]
    fn dequeue_provenance_tracks_the_three_acquisition_paths() {
        let (mut pager, _tally) = counting_pager(&[1, 2, 3]);
        pager.reload(&mut NoDelegate).unwrap();

        // The active card already shows page 1.
        let again = pager.dequeue_adapter(&1, 0).unwrap();
        assert_eq!(again.provenance, Provenance::SameItem);

        // Page 2 has never been shown: the factory runs.
        let fresh = pager.dequeue_adapter(&2, 1).unwrap();
        assert_eq!(fresh.provenance, Provenance::Fresh);

        // Moving to page 2 releases the card showing page 1; a request for
        // the never-shown page 3 recycles it.
        pager.set_active_item(&2, false, &mut NoDelegate).unwrap();
        let recycled = pager.dequeue_adapter(&3, 2).unwrap();
        assert_eq!(recycled.provenance, Provenance::Recycled);
    }

    #[test]
    fn a_mutation_storm_keeps_the_bookkeeping_consistent() {
        let (mut pager, _tally) = counting_pager(&[10, 20, 30, 40, 50]);
        pager.reload(&mut NoDelegate).unwrap();
        pager.set_active_item(&30, false, &mut NoDelegate).unwrap();

        // Batched insert/remove/reorder around and through the active page.
        pager.mutate(&mut NoDelegate, |list| {
            list.insert(0, 5);
            list.remove_item(&10);
            list.swap(0, 2);
            list.push(60);
        }).unwrap();

        // The active item survived every shuffle, so it stays active with a
        // re-derived index.
        let active = *pager.active_item().unwrap();
        assert_eq!(active, 30);
        let index = pager.active_index().unwrap();
        assert_eq!(pager.source().get(index), Some(&30));

        // Now remove the active page itself.
        pager.mutate(&mut NoDelegate, |list| {
            list.remove_item(&30);
        }).unwrap();
        let active = *pager.active_item().unwrap();
        assert_ne!(active, 30);
        assert!(pager.source().items().contains(&active));

        // One adapter stays active; everything else is back in the pool.
        assert_eq!(pager.pool().active_count(&"page".into()), 1);
    }

    #[test]
    fn vertical_pagers_track_the_vertical_axis() {
        let (mut pager, _tally) = counting_pager_with(
            &[1, 2, 3],
            PagerConfig {
                orientation: Orientation::Vertical,
                viewport_extent: 320.0,
                ..PagerConfig::default()
            },
        );
        pager.reload(&mut NoDelegate).unwrap();

        // A horizontal drag has no component along a vertical pager's axis.
        pager.update_gesture(
            PanSample::new(Vec2::new(-150.0, 0.0), Vec2::ZERO),
            &mut NoDelegate,
        ).unwrap();
        assert!(!pager.is_transitioning());

        // Dragging up reveals the next page.
        pager.update_gesture(
            PanSample::new(Vec2::new(0.0, -150.0), Vec2::ZERO),
            &mut NoDelegate,
        ).unwrap();
        assert!(pager.is_transitioning());
        let candidate = pager.other_adapter().unwrap();
        assert_eq!(pager.item_for_adapter(candidate), Some(&2));
    }
}
