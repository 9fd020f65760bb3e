#![allow(non_snake_case)]

use std::cell::Cell;

use dioxus::prelude::*;
use dioxus_context_factory::{create_context, Slot};
use dioxus_core::NoOpMutations;
use pretty_assertions::assert_eq;

#[test]
fn consumer_reads_the_provided_value() {
    let (_, Provider, use_greeting) = create_context(|name: &'static str| format!("hello {name}"));

    let Greeting = move || -> Element {
        let greeting = use_greeting.get().expect("rendered inside the provider");
        rsx! { div { "{greeting}" } }
    };

    let html = dioxus_ssr::render_element(rsx! {
        Provider { input: "world",
            Greeting {}
        }
    });

    assert_eq!(html, "<div>hello world</div>");
}

#[test]
fn innermost_provider_wins() {
    let (_, Provider, use_depth) = create_context(|depth: u32| depth);

    let Depth = move || -> Element {
        let depth = use_depth.get().expect("rendered inside the provider");
        rsx! { span { "{depth}" } }
    };

    let html = dioxus_ssr::render_element(rsx! {
        Provider { input: 1,
            Depth {}
            Provider { input: 2,
                Depth {}
            }
            Depth {}
        }
    });

    assert_eq!(html, "<span>1</span><span>2</span><span>1</span>");
}

#[test]
fn factories_with_the_same_value_type_are_isolated() {
    let (_, First, use_first) = create_context(|value: i32| value);
    let (_, Second, use_second) = create_context(|value: i32| value);

    let Both = move || -> Element {
        let first = use_first.get().expect("inside the first provider");
        let second = use_second.get().expect("inside the second provider");
        rsx! { p { "{first} {second}" } }
    };

    let OnlyFirst = move || -> Element {
        let missing = use_second.get().is_err();
        rsx! { p { "{missing}" } }
    };

    let html = dioxus_ssr::render_element(rsx! {
        First { input: 1,
            Second { input: 2,
                Both {}
            }
            OnlyFirst {}
        }
    });

    assert_eq!(html, "<p>1 2</p><p>true</p>");
}

#[test]
fn slot_reads_match_the_accessor() {
    let (slot, Provider, use_name) = create_context(|name: &'static str| name);

    let Check = move || -> Element {
        let from_slot = slot.try_read();
        let from_accessor = use_name.get().ok();
        assert_eq!(from_slot, from_accessor);
        let provided = slot.has_provider();
        rsx! { p { "{provided}" } }
    };

    let html = dioxus_ssr::render_element(rsx! {
        Check {}
        Provider { input: "inner",
            Check {}
        }
    });

    assert_eq!(html, "<p>false</p><p>true</p>");
}

thread_local! {
    static SOURCE: Cell<Option<Signal<i32>>> = const { Cell::new(None) };
}

#[test]
fn new_input_reaches_memoized_consumers() {
    let (_, Provider, use_doubled) = create_context(|value: i32| value * 2);

    let Doubled = move || -> Element {
        let doubled = use_doubled.get().expect("rendered inside the provider");
        rsx! { div { "{doubled}" } }
    };

    // Takes no props, so it is never re-rendered by its parent
    let Wall = move || -> Element {
        rsx! { Doubled {} }
    };

    let app = move |_: ()| -> Element {
        let source = use_signal(|| 1);
        SOURCE.with(|cell| cell.set(Some(source)));
        let value = *source.read();

        rsx! {
            Provider { input: value,
                Wall {}
            }
        }
    };

    let mut dom = VirtualDom::new_with_props(app, ());
    dom.rebuild_in_place();
    assert_eq!(dioxus_ssr::render(&dom), "<div>2</div>");

    dom.in_runtime(|| {
        let mut source = SOURCE
            .with(|cell| cell.get())
            .expect("the app rendered once");
        source.set(5);
    });
    dom.render_immediate(&mut NoOpMutations);
    dom.render_immediate(&mut NoOpMutations);

    assert_eq!(dioxus_ssr::render(&dom), "<div>10</div>");
}

thread_local! {
    static LEVEL: Cell<Option<Slot<u32>>> = const { Cell::new(None) };
    static TICK: Cell<Option<Signal<u32>>> = const { Cell::new(None) };
}

#[test]
fn value_function_sees_the_enclosing_provider() {
    // Each level adds its input to the level of the provider around it
    let (slot, Provider, use_level) = create_context(|offset: u32| {
        let enclosing = LEVEL
            .with(|cell| cell.get())
            .and_then(|slot| slot.try_read())
            .unwrap_or(0);
        enclosing + offset
    });
    LEVEL.with(|cell| cell.set(Some(slot)));

    let Level = move || -> Element {
        let level = use_level.get().expect("rendered inside the provider");
        rsx! { div { "{level}" } }
    };

    let app = move |_: ()| -> Element {
        let tick = use_signal(|| 0);
        TICK.with(|cell| cell.set(Some(tick)));
        let inner = 10 + *tick.read();

        rsx! {
            Provider { input: 1,
                Provider { input: inner,
                    Level {}
                }
            }
        }
    };

    let mut dom = VirtualDom::new_with_props(app, ());
    dom.rebuild_in_place();
    assert_eq!(dioxus_ssr::render(&dom), "<div>11</div>");

    dom.in_runtime(|| {
        let mut tick = TICK.with(|cell| cell.get()).expect("the app rendered once");
        tick.set(1);
    });
    dom.render_immediate(&mut NoOpMutations);
    dom.render_immediate(&mut NoOpMutations);

    assert_eq!(dioxus_ssr::render(&dom), "<div>12</div>");
}

thread_local! {
    static SWAPPED: Cell<Option<Signal<bool>>> = const { Cell::new(None) };
}

#[test]
fn swapping_providers_of_the_same_type_switches_the_context() {
    let shared = |value: i32| value;
    let (_, First, use_first) = create_context(shared);
    let (_, Second, use_second) = create_context(shared);

    let Reader = move || -> Element {
        let first = use_first.get().map_or("none".to_string(), |value| value.to_string());
        let second = use_second.get().map_or("none".to_string(), |value| value.to_string());
        rsx! { p { "a={first} b={second}" } }
    };

    let app = move |_: ()| -> Element {
        let swapped = use_signal(|| false);
        SWAPPED.with(|cell| cell.set(Some(swapped)));
        let Provider = if *swapped.read() { Second } else { First };

        rsx! {
            Provider { input: 1,
                Reader {}
            }
        }
    };

    let mut dom = VirtualDom::new_with_props(app, ());
    dom.rebuild_in_place();
    assert_eq!(dioxus_ssr::render(&dom), "<p>a=1 b=none</p>");

    dom.in_runtime(|| {
        let mut swapped = SWAPPED.with(|cell| cell.get()).expect("the app rendered once");
        swapped.set(true);
    });
    dom.render_immediate(&mut NoOpMutations);
    dom.render_immediate(&mut NoOpMutations);

    assert_eq!(dioxus_ssr::render(&dom), "<p>a=none b=1</p>");
}
