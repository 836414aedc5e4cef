//! Click counter, headless: one `Composition`, a remembered signal, and a
//! keyed effect standing in for the document-title update.

use attune_core::{launched_effect, prelude::*};

fn compose_counter(clicks: u32) {
    let count = remember(|| signal(0u32));
    count.set(clicks);

    // Fires only when the count actually changed, not on every pass.
    launched_effect!(count.get(), {
        let now = count.get();
        move || log::info!("you clicked {now} times")
    });

    // Cart total in the same pass; recomputed only when the menu changes.
    let menu: &[(u32, u32)] = if clicks < 3 {
        &[(120, 2), (80, 1)]
    } else {
        &[(120, 2), (80, 1), (40, 5)]
    };
    let total = memo(menu.to_vec(), || {
        menu.iter().map(|(price, qty)| price * qty).sum::<u32>()
    });
    log::info!("cart total: {total}");
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut host = Composition::new();
    for clicks in 0..5u32 {
        host.compose(move || compose_counter(clicks));
    }
    host.retire();
    Ok(())
}
