//! Integration Tests for Notifiers and Bindings
//!
//! These tests drive the public API the way an application and its
//! rendering host would.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use notifier_core::{
    ChangeBinding, ChangeNotifier, Listener, NotifierConfig, NotifierError, NotifyPolicy,
    PendingRerender, ValueBinding, ValueNotifier,
};

fn counting_listener() -> (Listener, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let count_clone = count.clone();
    let listener = Listener::new(move || count_clone.set(count_clone.get() + 1));
    (listener, count)
}

/// A listener registered twice runs twice per dispatch.
#[test]
fn change_notifier_counts_duplicate_entries() {
    let notifier = ChangeNotifier::new();
    let (listener, count) = counting_listener();

    notifier.add_listener(listener.clone());
    notifier.add_listener(listener);

    notifier.notify_listeners();
    notifier.notify_listeners();

    assert_eq!(count.get(), 4);
}

/// Each removal takes out exactly one of the duplicate entries.
#[test]
fn change_notifier_removes_one_entry_per_call() {
    let notifier = ChangeNotifier::new();
    let (listener, count) = counting_listener();

    notifier.add_listener(listener.clone());
    notifier.add_listener(listener.clone());

    notifier.notify_listeners();
    assert_eq!(count.get(), 2);

    notifier.remove_listener(&listener);
    notifier.notify_listeners();
    assert_eq!(count.get(), 3);

    notifier.remove_listener(&listener);
    notifier.notify_listeners();
    assert_eq!(count.get(), 3);

    assert_eq!(
        notifier.try_remove_listener(&listener),
        Err(NotifierError::ListenerNotRegistered {
            listener: listener.id()
        })
    );
}

/// Value writes dispatch and the new value is visible afterwards.
#[test]
fn value_notifier_increments() {
    let notifier = ValueNotifier::new(0);
    let (listener, count) = counting_listener();
    notifier.add_listener(listener);

    notifier.update(|v| v + 1);
    assert_eq!(count.get(), 1);
    assert_eq!(notifier.get(), 1);

    notifier.update(|v| v + 1);
    assert_eq!(count.get(), 2);
    assert_eq!(notifier.get(), 2);
}

/// Writing an equal value still dispatches unless configured otherwise.
#[test]
fn value_notifier_equal_writes() {
    let always = ValueNotifier::new(5);
    let on_change =
        ValueNotifier::with_config(5, NotifierConfig::new().with_notify(NotifyPolicy::OnChange));
    let (always_listener, always_count) = counting_listener();
    let (on_change_listener, on_change_count) = counting_listener();

    always.add_listener(always_listener);
    on_change.add_listener(on_change_listener);

    always.set(5);
    on_change.set(5);

    assert_eq!(always_count.get(), 1);
    assert_eq!(on_change_count.get(), 0);
}

/// A fresh change binding starts at false and flips per dispatch.
#[test]
fn change_binding_ticks() {
    let notifier = ChangeNotifier::new();
    let host = Rc::new(PendingRerender::new());
    let mut binding = ChangeBinding::new(host.clone());

    assert!(!binding.observe(&notifier));

    notifier.notify_listeners();
    assert!(host.take());
    assert!(binding.observe(&notifier));

    notifier.notify_listeners();
    assert!(host.take());
    assert!(!binding.observe(&notifier));
}

/// A value binding exposes the container's value after each change.
#[test]
fn value_binding_follows_container() {
    let notifier = ValueNotifier::new(10);
    let host = Rc::new(PendingRerender::new());
    let mut binding = ValueBinding::new(host.clone());

    assert_eq!(binding.observe(&notifier), 10);

    notifier.update(|v| v + 1);
    assert!(host.take());
    assert_eq!(binding.observe(&notifier), 11);
}

/// A small render loop: the consumer re-evaluates only when the host was
/// asked to, and stops hearing about changes once it is unmounted.
#[test]
fn render_loop_mount_update_unmount() {
    let name = ValueNotifier::new(String::from("world"));
    let host = Rc::new(PendingRerender::new());
    let frames = RefCell::new(Vec::new());

    let mut binding = Some(ValueBinding::new(host.clone()));
    let render = |binding: &mut ValueBinding<String>| {
        frames
            .borrow_mut()
            .push(format!("hello {}", binding.observe(&name)));
    };

    // Mount
    if let Some(binding) = binding.as_mut() {
        render(binding);
    }

    // No change, no frame
    if host.take() {
        if let Some(binding) = binding.as_mut() {
            render(binding);
        }
    }

    name.set(String::from("notifier"));
    if host.take() {
        if let Some(binding) = binding.as_mut() {
            render(binding);
        }
    }

    // Unmount
    binding = None;
    assert!(binding.is_none());
    assert!(!name.has_listeners());

    name.set(String::from("nobody"));
    assert!(!host.take());

    assert_eq!(*frames.borrow(), vec!["hello world", "hello notifier"]);
}

/// Several consumers on one notifier are each asked to re-render.
#[test]
fn multiple_bindings_share_a_notifier() {
    let notifier = ChangeNotifier::new();
    let hosts: Vec<Rc<PendingRerender>> = (0..3).map(|_| Rc::new(PendingRerender::new())).collect();
    let mut bindings: Vec<ChangeBinding<ChangeNotifier>> = hosts
        .iter()
        .map(|host| ChangeBinding::new(host.clone()))
        .collect();

    for binding in &mut bindings {
        binding.observe(&notifier);
    }
    assert_eq!(notifier.listener_count(), 3);

    notifier.notify_listeners();
    assert!(hosts.iter().all(|host| host.take()));

    bindings.remove(1);
    assert_eq!(notifier.listener_count(), 2);

    notifier.notify_listeners();
    assert!(hosts[0].take());
    assert!(!hosts[1].take());
    assert!(hosts[2].take());
}
