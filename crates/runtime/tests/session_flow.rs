//! End-to-end sessions driven through [`RuntimeHandle`] with manual ticks.

use std::path::PathBuf;

use aerial_content::ContentFactory;
use aerial_core::action::ProjectileGun;
use aerial_core::{
    EquipmentId, Modification, ModificationTarget, Modifier, PlayerId, SlotIndex, Tick,
};
use aerial_runtime::{
    CombatEvent, Event, LoadoutEvent, PurchaseOutcome, Runtime, RuntimeConfig, RuntimeError,
    TickMode, Topic,
};
use tracing_subscriber::EnvFilter;

const PILOT: PlayerId = PlayerId(1);
const TARGET: PlayerId = PlayerId(2);

async fn start() -> Runtime {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data");
    let content = ContentFactory::new(data).load().unwrap();
    let config = RuntimeConfig {
        tick_mode: TickMode::Manual,
        ..RuntimeConfig::with_game(content.config.clone())
    };

    Runtime::builder()
        .config(config)
        .content(content)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn join_uses_default_class_and_starting_money() {
    let runtime = start().await;
    let handle = runtime.handle();

    let snapshot = handle.join(PILOT).await.unwrap();
    assert_eq!(snapshot.class, "Pilot");
    assert_eq!(snapshot.money, 100);
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[1].amount, 2);

    assert!(matches!(
        handle.join(PILOT).await,
        Err(RuntimeError::AlreadyJoined(PILOT))
    ));
    assert!(matches!(
        handle.query_session(TARGET).await,
        Err(RuntimeError::UnknownPlayer(TARGET))
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn double_click_buys_a_bundle_once() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut loadout_events = handle.subscribe(Topic::Loadout);
    handle.join(PILOT).await.unwrap();

    let first = handle.click_bundle(PILOT, "rockets").await.unwrap();
    let second = handle.click_bundle(PILOT, "rockets").await.unwrap();

    assert!(first.is_applied());
    assert_eq!(second, PurchaseOutcome::Debounced);

    let snapshot = handle.query_session(PILOT).await.unwrap();
    assert_eq!(snapshot.money, 90);
    assert_eq!(snapshot.items[1].amount, 4);

    let Event::Loadout(LoadoutEvent::Changed { bundle, money, .. }) =
        loadout_events.try_recv().unwrap()
    else {
        panic!("expected a loadout change");
    };
    assert_eq!(bundle.as_deref(), Some("rockets"));
    assert_eq!(money, 90);
    assert!(loadout_events.try_recv().is_err());

    handle.advance(5).await.unwrap();
    assert!(handle.click_bundle(PILOT, "rockets").await.unwrap().is_applied());
    assert_eq!(handle.query_session(PILOT).await.unwrap().money, 80);
}

#[tokio::test]
async fn unaffordable_unlock_is_rejected() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut loadout_events = handle.subscribe(Topic::Loadout);
    handle.join(PILOT).await.unwrap();

    for bundle in ["badge", "rockets", "rockets", "rockets"] {
        assert!(handle.click_bundle(PILOT, bundle).await.unwrap().is_applied());
        handle.advance(5).await.unwrap();
    }
    assert_eq!(handle.query_session(PILOT).await.unwrap().money, 45);

    let outcome = handle.click_bundle(PILOT, "medic").await.unwrap();
    assert_eq!(
        outcome,
        PurchaseOutcome::Locked {
            unlock_cost: 50,
            money: 45
        }
    );

    let rejected = std::iter::from_fn(|| loadout_events.try_recv().ok())
        .find(|event| matches!(event, Event::Loadout(LoadoutEvent::Rejected { .. })));
    assert!(rejected.is_some());

    assert!(matches!(
        handle.click_bundle(PILOT, "nowhere").await,
        Err(RuntimeError::UnknownBundle(_))
    ));
}

#[tokio::test]
async fn trigger_launches_projectiles_that_resolve_once() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    handle.join(PILOT).await.unwrap();

    handle.trigger(PILOT, "left_click").await.unwrap();
    assert_eq!(handle.advance(1).await.unwrap(), Tick(1));

    let Event::Combat(CombatEvent::ProjectilesLaunched { player, plan, .. }) =
        combat.try_recv().unwrap()
    else {
        panic!("expected a launch");
    };
    assert_eq!(player, PILOT);
    assert_eq!(plan.projectiles.len(), 1);

    let snapshot = handle.query_session(PILOT).await.unwrap();
    assert_eq!(snapshot.items[0].ammo, 59);
    assert_eq!(snapshot.items[0].cooldown, 3);

    let entity = plan.projectiles[0];
    let hit = handle.report_hit(entity, TARGET).await.unwrap().unwrap();
    assert_eq!(hit.record.creator, PILOT);
    assert_eq!(hit.record.item, Some(EquipmentId::from("gun")));
    assert!(matches!(
        combat.try_recv().unwrap(),
        Event::Combat(CombatEvent::Hit(_))
    ));

    assert_eq!(handle.report_hit(entity, TARGET).await.unwrap(), None);
    assert!(!handle.destroy_entity(entity).await.unwrap());
}

#[tokio::test]
async fn occurrences_do_not_carry_over_to_the_next_tick() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    handle.join(PILOT).await.unwrap();

    handle.advance(1).await.unwrap();
    handle.trigger(PILOT, "left_click").await.unwrap();
    handle.advance(10).await.unwrap();

    assert!(combat.try_recv().is_ok());
    assert!(combat.try_recv().is_err());
}

#[tokio::test]
async fn modifications_apply_across_purchases() {
    let runtime = start().await;
    let handle = runtime.handle();
    handle.join(PILOT).await.unwrap();

    let extra_ammo = Modification::new(
        "extra_ammo",
        ModificationTarget::UsableItem,
        [EquipmentId::from("gun")],
        [Modifier::new("max_ammo", "+(5)")],
    );

    assert!(handle.add_modification(PILOT, extra_ammo.clone()).await.unwrap());
    assert!(!handle.add_modification(PILOT, extra_ammo.clone()).await.unwrap());

    handle.click_bundle(PILOT, "rockets").await.unwrap();
    let snapshot = handle.query_session(PILOT).await.unwrap();
    assert_eq!(snapshot.modifications, vec!["extra_ammo".to_owned()]);
    assert_eq!(snapshot.items[0].max_ammo, 65);

    assert!(handle.remove_modification(PILOT, extra_ammo).await.unwrap());
    let snapshot = handle.query_session(PILOT).await.unwrap();
    assert_eq!(snapshot.items[0].max_ammo, 60);
}

#[tokio::test]
async fn item_set_is_transient_until_respawn() {
    let runtime = start().await;
    let handle = runtime.handle();
    handle.join(PILOT).await.unwrap();

    assert!(handle.click_bundle(PILOT, "badge").await.unwrap().is_applied());
    let snapshot = handle.query_session(PILOT).await.unwrap();
    assert!(snapshot.items.iter().any(|item| item.slot == SlotIndex(3)));

    handle.trigger(PILOT, "drop_item").await.unwrap();
    handle.advance(1).await.unwrap();

    let snapshot = handle.query_session(PILOT).await.unwrap();
    assert_eq!(snapshot.class, "Ace");
    assert_eq!(snapshot.loadout.engine, Some(EquipmentId::from("rocket_engine")));
    assert_eq!(snapshot.items[1].amount, 8);

    let snapshot = handle.respawn(PILOT).await.unwrap();
    assert_eq!(snapshot.loadout.engine, Some(EquipmentId::from("jet")));
    assert_eq!(snapshot.items.len(), 3);
}

#[tokio::test]
async fn leaving_forgets_launched_projectiles() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    handle.join(PILOT).await.unwrap();

    handle.trigger(PILOT, "right_click").await.unwrap();
    handle.advance(1).await.unwrap();
    let Event::Combat(CombatEvent::ProjectilesLaunched { plan, .. }) = combat.try_recv().unwrap()
    else {
        panic!("expected a rocket burst");
    };
    assert_eq!(plan.projectiles.len(), 3);

    handle.leave(PILOT).await.unwrap();
    assert_eq!(handle.report_hit(plan.projectiles[0], TARGET).await.unwrap(), None);
    assert!(matches!(
        handle.trigger(PILOT, "right_click").await,
        Err(RuntimeError::UnknownPlayer(PILOT))
    ));
}

#[tokio::test]
async fn unreported_projectiles_expire_after_their_lifetime() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    handle.join(PILOT).await.unwrap();

    handle.trigger(PILOT, "left_click").await.unwrap();
    handle.advance(1).await.unwrap();
    let Event::Combat(CombatEvent::ProjectilesLaunched { plan, .. }) = combat.try_recv().unwrap()
    else {
        panic!("expected a launch");
    };
    let entity = plan.projectiles[0];

    let lifetime = u64::from(ProjectileGun::LIFETIME_TICKS);
    handle.advance(lifetime - 2).await.unwrap();
    assert!(combat.try_recv().is_err());

    handle.advance(1).await.unwrap();
    assert!(matches!(
        combat.try_recv().unwrap(),
        Event::Combat(CombatEvent::EntityDestroyed { entity: expired }) if expired == entity
    ));
    assert_eq!(handle.report_hit(entity, TARGET).await.unwrap(), None);
}
