//! Friend status three ways: lifecycle callbacks, composition hook, and
//! higher-order wrapper, all against one in-memory hub.

use std::rc::Rc;

use anyhow::Result;
use attune_core::Composition;
use attune_presence::{
    FriendId, FriendProps, Host, PresenceHub, Status, StatusWatcher, use_friend_status,
    with_friend_status,
};
use serde::{Deserialize, Serialize};

/// Row of the friends table the demo prints at the end.
#[derive(Debug, Serialize, Deserialize)]
struct RosterRow {
    name: String,
    age: u32,
    checked: bool,
    /// None until the friend has registered an identity document.
    id: Option<String>,
}

const ALICE: FriendId = FriendId(1);
const BOB: FriendId = FriendId(2);

fn lifecycle_surface(hub: &Rc<PresenceHub>) -> Result<()> {
    log::info!("-- lifecycle surface --");
    let watcher = StatusWatcher::new(hub.clone());
    let status = watcher.status();

    let mut host = Host::mount(watcher, FriendProps { friend: ALICE })?;
    hub.publish(ALICE, Status::Online);
    log::info!("alice: {:?}", status.get());

    host.set_props(FriendProps { friend: BOB })?;
    hub.publish(BOB, Status::Offline);
    log::info!("bob: {:?}", status.get());

    host.unmount()?;
    Ok(())
}

fn hook_surface(hub: &Rc<PresenceHub>) {
    log::info!("-- hook surface --");
    let mut comp = Composition::new();

    for friend in [ALICE, ALICE, BOB] {
        let hub = hub.clone();
        let hook_hub = hub.clone();
        let status = comp.compose(move || use_friend_status(&hook_hub, friend));
        hub.publish(friend, Status::Online);
        log::info!("{friend}: {:?}", status.get());
    }
    comp.retire();
}

fn wrapper_surface(hub: &Rc<PresenceHub>) -> Result<()> {
    log::info!("-- wrapper surface --");
    let badge = |props: &FriendProps, status: Option<Status>| match status {
        Some(s) => format!("friend {} is {s}", props.friend),
        None => format!("friend {} is loading", props.friend),
    };

    let mut host = Host::mount(
        with_friend_status(hub.clone(), badge),
        FriendProps { friend: ALICE },
    )?;
    log::info!("{}", host.component().render(host.props()));

    hub.publish(ALICE, Status::Online);
    log::info!("{}", host.component().render(host.props()));

    host.set_props(FriendProps { friend: BOB })?;
    hub.publish(BOB, Status::Offline);
    log::info!("{}", host.component().render(host.props()));

    host.unmount()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let hub = PresenceHub::new();
    lifecycle_surface(&hub)?;
    hook_surface(&hub);
    wrapper_surface(&hub)?;
    assert_eq!(hub.total_watchers(), 0);

    let roster = vec![
        RosterRow {
            name: "Alice".into(),
            age: 31,
            checked: true,
            id: Some("A-1024".into()),
        },
        RosterRow {
            name: "Bob".into(),
            age: 27,
            checked: false,
            id: None,
        },
    ];
    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}
