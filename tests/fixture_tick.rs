//! End-to-end ticks through the public API.

use std::collections::HashMap;

use tick_quoter::prelude::*;

fn config() -> EngineConfig {
    EngineConfig::new(20, 10)
        .unwrap()
        .with_instrument("PEARLS", InstrumentConfig::new(InstrumentClass::stable()))
        .with_instrument("BANANAS", InstrumentConfig::new(InstrumentClass::trending()))
}

fn fixture_state() -> TradingState {
    let mut state = TradingState::new(1000)
        .with_order_depth(
            "PEARLS",
            OrderDepth::new()
                .with_buy(dec!(9998), 7)
                .with_buy(dec!(9997), 5)
                .with_sell(dec!(10001), -4)
                .with_sell(dec!(10002), -8),
        )
        .with_order_depth(
            "BANANAS",
            OrderDepth::new()
                .with_buy(dec!(5000), 10)
                .with_buy(dec!(4999), 5)
                .with_sell(dec!(5007), -5)
                .with_sell(dec!(5008), -8),
        )
        .with_position("PEARLS", 18)
        .with_position("BANANAS", -5);

    state.listings = HashMap::from([
        ("PEARLS".to_string(), Listing::new("PEARLS", "PEARLS", "SEASHELLS")),
        ("BANANAS".to_string(), Listing::new("BANANAS", "BANANAS", "SEASHELLS")),
    ]);
    state.market_trades = HashMap::from([(
        "PEARLS".to_string(),
        vec![Trade::new("PEARLS", dec!(11), 4, 900)],
    )]);
    state
}

#[test]
fn test_fixture_tick() {
    let mut engine = QuotingEngine::new(config()).unwrap();
    let report = engine.run_with_report(&fixture_state());

    assert_eq!(report.timestamp, 1000);
    assert_eq!(report.orders.len(), 2);

    // long 18 of 20: two units of room on each side
    let pearls = report.orders_for("PEARLS");
    assert_eq!(pearls.len(), 2);
    assert_eq!(pearls[0].quantity, 2);
    assert_eq!(pearls[1].quantity, -2);
    assert!(pearls[0].price < dec!(9999.5));
    assert!(pearls[1].price > dec!(9999.5));

    // 15 bid vs 13 ask is far from the momentum threshold
    assert!(report.orders_for("BANANAS").is_empty());
    assert_eq!(report.outcomes["BANANAS"], InstrumentOutcome::Quoted { orders: 0 });
}

#[test]
fn test_fills_feed_back_into_capacity() {
    let mut engine = QuotingEngine::new(config()).unwrap();
    let book = OrderDepth::new()
        .with_buy(dec!(9998), 7)
        .with_sell(dec!(10001), -4);

    let first = engine.run(&TradingState::new(100).with_order_depth("PEARLS", book.clone()));
    assert_eq!(first["PEARLS"][0].quantity, 20);
    assert_eq!(first["PEARLS"][1].quantity, -20);

    // harness filled 6 of our bid
    let second = TradingState::new(200)
        .with_order_depth("PEARLS", book)
        .with_position("PEARLS", 0)
        .with_own_trade(Trade::new("PEARLS", first["PEARLS"][0].price, 6, 150));
    let orders = engine.run(&second);
    assert_eq!(orders["PEARLS"][0].quantity, 14);
    assert_eq!(orders["PEARLS"][1].quantity, -20);
}

#[test]
fn test_ask_heavy_trending_book_sells() {
    let mut engine = QuotingEngine::new(config()).unwrap();
    let state = TradingState::new(100)
        .with_order_depth(
            "BANANAS",
            OrderDepth::new()
                .with_buy(dec!(5000), 2)
                .with_sell(dec!(5007), -10)
                .with_sell(dec!(5008), -8),
        )
        .with_position("BANANAS", -5);

    let orders = engine.run(&state);
    let bananas = &orders["BANANAS"];

    assert_eq!(bananas.len(), 1);
    assert_eq!(bananas[0].side(), Side::Sell);
    assert_eq!(bananas[0].quantity, -15);

    // window seeded at the 5003.5 mid: mean 5003.5, variance 2.45
    let stats = engine.statistics("BANANAS").unwrap();
    assert!((stats.variance() - 2.45).abs() < 1e-9);
    assert_eq!(bananas[0].price, dec!(5003.8675));
}

#[test]
fn test_fair_value_instrument() {
    let config = EngineConfig::default().with_instrument(
        "BANANAS",
        InstrumentConfig::new(InstrumentClass::fair_value()).with_seed_price(5010.0),
    );
    let mut engine = QuotingEngine::new(config).unwrap();
    let state = TradingState::new(100).with_order_depth(
        "BANANAS",
        OrderDepth::new()
            .with_buy(dec!(5000), 10)
            .with_sell(dec!(5005), -7),
    );

    // fair = 0.7 * 5010 + 0.3 * 5002.5 = 5007.75, so the 5005 ask is cheap
    let orders = engine.run(&state);
    assert_eq!(
        orders["BANANAS"],
        vec![Order::new("BANANAS", Side::Buy, dec!(5005), 7)]
    );
}

#[test]
fn test_fair_value_ignores_empty_touch() {
    let config = EngineConfig::default().with_instrument(
        "BANANAS",
        InstrumentConfig::new(InstrumentClass::fair_value()).with_seed_price(5010.0),
    );
    let mut engine = QuotingEngine::new(config).unwrap();
    let state = TradingState::new(100).with_order_depth(
        "BANANAS",
        OrderDepth::new()
            .with_buy(dec!(5000), 10)
            .with_sell(dec!(5005), 0),
    );

    let report = engine.run_with_report(&state);
    assert!(report.orders_for("BANANAS").is_empty());
    assert_eq!(report.outcomes["BANANAS"], InstrumentOutcome::Quoted { orders: 0 });
}
