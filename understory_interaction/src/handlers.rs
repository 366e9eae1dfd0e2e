// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thin consumers that drive an [`InteractionContext`] from a list of nodes.
//!
//! Items are supplied in paint order (back to front). Each helper performs one step
//! of the frame protocol over the whole list; [`run_frame`] performs all of them.

use alloc::vec::Vec;
use core::fmt::Debug;
use kurbo::{Rect, Vec2};

use crate::context::InteractionContext;
use crate::types::{FrameInput, Target};

/// A node that takes part in interaction this frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interactive<K> {
    /// Node identifier.
    pub id: K,
    /// Hit-test rectangle, in pointer space.
    pub rect: Rect,
    /// Whether the node takes part in tab order.
    pub focusable: bool,
}

/// Hit-test every item. Returns the resulting hot target.
pub fn hit_test<K, A>(cx: &mut InteractionContext<K, A>, items: &[Interactive<K>]) -> Target<K>
where
    K: Copy + Eq + Debug,
    A: Copy + Eq + Debug,
{
    for item in items {
        cx.active_if_pointer_inside(item.id, item.rect);
    }
    cx.hot()
}

/// Register every focusable item, in order.
pub fn tab_order<K, A>(cx: &mut InteractionContext<K, A>, items: &[Interactive<K>])
where
    K: Copy + Eq + Debug,
    A: Copy + Eq + Debug,
{
    for item in items.iter().filter(|i| i.focusable) {
        cx.register_focusable(item.id);
    }
}

/// Call `on_click` for every clicked item. Returns the number of clicks.
pub fn dispatch_clicks<K, A>(
    cx: &mut InteractionContext<K, A>,
    items: &[Interactive<K>],
    mut on_click: impl FnMut(K),
) -> usize
where
    K: Copy + Eq + Debug,
    A: Copy + Eq + Debug,
{
    let mut count = 0;
    for item in items {
        if cx.is_click(&item.id) {
            on_click(item.id);
            count += 1;
        }
    }
    count
}

/// Call `on_drag` with the pointer delta for every item being dragged. Returns the
/// number of calls.
pub fn dispatch_drags<K, A>(
    cx: &InteractionContext<K, A>,
    items: &[Interactive<K>],
    mut on_drag: impl FnMut(K, Vec2),
) -> usize
where
    K: Copy + Eq + Debug,
    A: Copy + Eq + Debug,
{
    let mut count = 0;
    for item in items {
        if let Some(delta) = cx.drag_delta(&item.id) {
            on_drag(item.id, delta);
            count += 1;
        }
    }
    count
}

/// Callbacks for [`run_frame`].
pub trait FrameHandlers<K> {
    /// `id` was clicked.
    fn click(&mut self, id: K) {
        let _ = id;
    }

    /// `id` is being dragged by `delta` this frame.
    fn drag(&mut self, id: K, delta: Vec2) {
        let _ = (id, delta);
    }
}

/// What happened during one [`run_frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSummary<K> {
    /// Hot target after hit-testing.
    pub hot: Target<K>,
    /// Active target after the frame ended.
    pub active: Target<K>,
    /// Focus target after the frame ended.
    pub focus: Target<K>,
    /// Clicked items, in paint order.
    pub clicked: Vec<K>,
    /// Items that received a drag callback.
    pub dragged: usize,
}

/// Run one complete frame: begin, hit-test, tab order, clicks, drags, end.
pub fn run_frame<K, A, H>(
    cx: &mut InteractionContext<K, A>,
    input: &FrameInput<A>,
    items: &[Interactive<K>],
    handlers: &mut H,
) -> FrameSummary<K>
where
    K: Copy + Eq + Debug,
    A: Copy + Eq + Debug,
    H: FrameHandlers<K> + ?Sized,
{
    cx.begin_frame(input);
    let hot = hit_test(cx, items);
    tab_order(cx, items);
    let mut clicked = Vec::new();
    dispatch_clicks(cx, items, |id| {
        clicked.push(id);
        handlers.click(id);
    });
    let dragged = dispatch_drags(cx, items, |id, delta| handlers.drag(id, delta));
    cx.end_frame();
    FrameSummary {
        hot,
        active: cx.active(),
        focus: cx.focus(),
        clicked,
        dragged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NavigationActions;
    use crate::types::ActionEvent;
    use alloc::vec;
    use kurbo::Point;

    const NAV: NavigationActions<char> = NavigationActions {
        next: '\t',
        previous: 'p',
        confirm: '\n',
        modifier: 's',
    };

    fn items() -> Vec<Interactive<u32>> {
        vec![
            Interactive {
                id: 1,
                rect: Rect::new(0.0, 0.0, 200.0, 200.0),
                focusable: false,
            },
            Interactive {
                id: 2,
                rect: Rect::new(10.0, 10.0, 60.0, 40.0),
                focusable: true,
            },
            Interactive {
                id: 3,
                rect: Rect::new(10.0, 50.0, 60.0, 80.0),
                focusable: true,
            },
        ]
    }

    #[derive(Default)]
    struct Log {
        clicks: Vec<u32>,
        drags: Vec<(u32, Vec2)>,
    }

    impl FrameHandlers<u32> for Log {
        fn click(&mut self, id: u32) {
            self.clicks.push(id);
        }

        fn drag(&mut self, id: u32, delta: Vec2) {
            self.drags.push((id, delta));
        }
    }

    #[test]
    fn topmost_item_is_hot() {
        let mut cx: InteractionContext<u32, char> = InteractionContext::new(NAV);
        cx.begin_frame(&FrameInput::pointer(Point::new(20.0, 20.0), false));
        assert_eq!(hit_test(&mut cx, &items()), Target::Node(2));
        cx.end_frame();
    }

    #[test]
    fn run_frame_clicks_and_drags() {
        let mut cx = InteractionContext::new(NAV);
        let mut log = Log::default();
        let items = items();

        let s = run_frame(
            &mut cx,
            &FrameInput::pointer(Point::new(20.0, 60.0), true),
            &items,
            &mut log,
        );
        assert_eq!(s.hot, Target::Node(3));
        assert_eq!(s.active, Target::Node(3));
        assert_eq!(s.dragged, 1);

        run_frame(
            &mut cx,
            &FrameInput::pointer(Point::new(25.0, 62.0), true),
            &items,
            &mut log,
        );
        let s = run_frame(
            &mut cx,
            &FrameInput::pointer(Point::new(25.0, 62.0), false),
            &items,
            &mut log,
        );
        assert_eq!(s.clicked, vec![3]);
        assert_eq!(s.active, Target::Root);
        assert_eq!(log.clicks, vec![3]);
        assert_eq!(log.drags[1], (3, Vec2::new(5.0, 2.0)));
    }

    #[test]
    fn keyboard_confirm_clicks_focused() {
        let mut cx = InteractionContext::new(NAV);
        cx.set_focus(2_u32);
        let mut clicks = 0;
        cx.begin_frame(&FrameInput::default().with_action(ActionEvent::pressed('\n')));
        tab_order(&mut cx, &items());
        dispatch_clicks(&mut cx, &items(), |id| {
            assert_eq!(id, 2);
            clicks += 1;
        });
        cx.end_frame();
        assert_eq!(clicks, 1);
        assert!(cx.has_focus(&2));
    }

    #[test]
    fn tab_order_skips_unfocusable() {
        let mut cx = InteractionContext::new(NAV);
        cx.set_focus(3_u32);
        let input = FrameInput::default().with_action(ActionEvent::pressed('p'));
        let s = run_frame(&mut cx, &input, &items(), &mut Log::default());
        assert_eq!(s.focus, Target::Node(2), "item 1 is not focusable");
    }

    #[test]
    fn default_handlers_are_no_ops() {
        struct Quiet;
        impl FrameHandlers<u32> for Quiet {}
        let mut cx = InteractionContext::new(NAV);
        let s = run_frame(
            &mut cx,
            &FrameInput::pointer(Point::new(20.0, 20.0), true),
            &items(),
            &mut Quiet,
        );
        assert_eq!(s.active, Target::Node(2));
    }
}
