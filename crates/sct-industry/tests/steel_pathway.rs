//! End-to-end tests for the steel pathway builder.

use proptest::prelude::*;
use sct_core::{
    Bus, ComponentKind, CostTable, Diagnostics, Hours, IndustrialProduction, Network, PerUnit,
    ProductionSeries, SctError,
};
use sct_industry::technologies::{DRI_FURNACE, ELECTRIC_ARC_FURNACE, IRON_ORE};
use sct_industry::{
    build_steel_pathway, ConversionParameters, SteelInputs, SteelOptions, STEEL_SECTOR,
};

fn costs() -> CostTable {
    CostTable::new()
        .with(DRI_FURNACE, "electricity-input", 1.5)
        .with(DRI_FURNACE, "hydrogen-input", 0.3)
        .with(DRI_FURNACE, "fixed", 100.0)
        .with(DRI_FURNACE, "ore-input", 1.2)
        .with(IRON_ORE, "commodity", 50.0)
        .with(ELECTRIC_ARC_FURNACE, "electricity-input", 0.8)
        .with(ELECTRIC_ARC_FURNACE, "fixed", 60.0)
        .with(ELECTRIC_ARC_FURNACE, "hbi-input", 1.1)
}

fn scalar_production(tonnes: f64) -> IndustrialProduction {
    let mut production = IndustrialProduction::new();
    production.insert_sector(STEEL_SECTOR, ProductionSeries::scalar(tonnes));
    production
}

fn nodes(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn base_network(nodes: &[String]) -> Network {
    let mut network = Network::new();
    for node in nodes {
        network.add_bus(Bus::new(node.clone(), "AC")).unwrap();
        network.add_bus(Bus::new(format!("{node} H2"), "H2")).unwrap();
    }
    network
}

fn build(
    production: &IndustrialProduction,
    costs: &CostTable,
    nodes: &[String],
    options: SteelOptions,
) -> Network {
    let mut network = base_network(nodes);
    let inputs = SteelInputs {
        industrial_production: production,
        costs,
        nodes,
        nhours: Hours(8760.0),
    };
    build_steel_pathway(&mut network, &inputs, &options).unwrap();
    network
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
        "{actual} != {expected}"
    );
}

#[test]
fn test_reference_scenario_two_nodes() {
    let nodes = nodes(&["A", "B"]);
    let network = build(
        &scalar_production(1000.0),
        &costs(),
        &nodes,
        SteelOptions::default(),
    );

    let load = network.load("EU steel").unwrap();
    assert_close(load.p_set, 1000.0 / 8760.0);
    assert!((load.p_set - 0.1142).abs() < 1e-4);

    for node in ["A", "B"] {
        let dri = network.link(&format!("{node} DRI")).unwrap();
        assert_eq!(dri.carrier, "DRI");
        assert_eq!(dri.bus(0), Some(node));
        assert_eq!(dri.bus(1), Some("EU HBI"));
        assert_eq!(dri.bus(2).map(str::to_string), Some(format!("{node} H2")));
        assert_close(dri.efficiency(1).unwrap(), 1.0 / 1.5);
        assert_close(dri.efficiency(2).unwrap(), -0.2);
        assert_close(dri.capital_cost, 100.0 / 1.5);
        assert_close(dri.marginal_cost, 50.0 * 1.2 / 1.5);
        assert_close(dri.p_nom_max.value(), 1000.0 * 1.1 * 1.5 / 8760.0);
        assert_eq!(dri.p_min_pu, PerUnit::ONE);
        assert!(dri.p_nom_extendable);

        let eaf = network.link(&format!("{node} EAF")).unwrap();
        assert_eq!(eaf.carrier, "EAF");
        assert_eq!(eaf.bus(0), Some(node));
        assert_eq!(eaf.bus(1), Some("EU steel"));
        assert_eq!(eaf.bus(2), Some("EU HBI"));
        assert_close(eaf.efficiency(1).unwrap(), 1.25);
        assert_close(eaf.efficiency(2).unwrap(), -1.375);
        assert_close(eaf.capital_cost, 60.0 / 0.8);
        assert_eq!(eaf.marginal_cost, 0.0);
        assert_close(eaf.p_nom_max.value(), 1000.0 * 0.8 / 8760.0);
        assert_eq!(eaf.p_min_pu, PerUnit::ONE);
    }

    assert!(network.stores().is_empty());
    let stats = network.stats();
    assert_eq!(stats.num_buses, 4 + 2);
    assert_eq!(stats.num_loads, 1);
    assert_eq!(stats.num_links, 4);
}

#[test]
fn test_commodity_buses() {
    let nodes = nodes(&["A"]);
    let network = build(&scalar_production(10.0), &costs(), &nodes, SteelOptions::default());
    for (name, carrier) in [("EU steel", "steel"), ("EU HBI", "HBI")] {
        let bus = network.bus(name).unwrap();
        assert_eq!(bus.carrier, carrier);
        assert_eq!(bus.location.as_deref(), Some("EU"));
        assert_eq!(bus.unit.as_deref(), Some("t"));
    }
}

#[test]
fn test_flexibility_adds_one_cyclic_store_per_pool() {
    let nodes = nodes(&["A", "B", "C"]);
    let options = SteelOptions {
        flexibility_steel: true,
        ..SteelOptions::default()
    };
    let network = build(&scalar_production(1000.0), &costs(), &nodes, options);

    assert_eq!(network.stores().len(), 2);
    for bus in ["EU steel", "EU HBI"] {
        let stores = network.stores_at_bus(bus);
        assert_eq!(stores.len(), 1);
        assert!(stores[0].e_nom_extendable);
        assert!(stores[0].e_cyclic);
        assert!(stores[0].e_nom_max.is_infinite());
    }
    assert!(network.links().iter().all(|l| l.p_min_pu == PerUnit::ZERO));
    // relocation stays off
    assert!(network.links().iter().all(|l| l.p_nom_max.is_finite()));
}

#[test]
fn test_relocation_removes_caps_for_every_node() {
    let nodes = nodes(&["A", "B", "C"]);
    let options = SteelOptions {
        relocation_steel: true,
        ..SteelOptions::default()
    };
    let network = build(&scalar_production(1000.0), &costs(), &nodes, options);

    assert_eq!(network.links().len(), 6);
    assert!(network.links().iter().all(|l| l.p_nom_max.value() == f64::INFINITY));
    // flexibility stays off
    assert!(network.stores().is_empty());
    assert!(network.links().iter().all(|l| l.p_min_pu == PerUnit::ONE));
}

#[test]
fn test_per_node_production_sizes_caps_locally() {
    let nodes = nodes(&["A", "B"]);
    let mut production = IndustrialProduction::new();
    production.set(STEEL_SECTOR, "A", 250.0);
    production.set(STEEL_SECTOR, "B", 750.0);
    production.set("Electric arc", "A", 9999.0);

    let network = build(&production, &costs(), &nodes, SteelOptions::default());

    assert_close(network.load("EU steel").unwrap().p_set, 1000.0 / 8760.0);
    assert_close(
        network.link("A EAF").unwrap().p_nom_max.value(),
        250.0 * 0.8 / 8760.0,
    );
    assert_close(
        network.link("B DRI").unwrap().p_nom_max.value(),
        750.0 * 1.1 * 1.5 / 8760.0,
    );
}

#[test]
fn test_dri_capacity_matches_eaf_feedstock() {
    // without relocation each node's DRI output covers exactly its EAF's HBI draw
    let nodes = nodes(&["A", "B"]);
    let network = build(&scalar_production(1000.0), &costs(), &nodes, SteelOptions::default());
    for node in ["A", "B"] {
        let dri = network.link(&format!("{node} DRI")).unwrap();
        let eaf = network.link(&format!("{node} EAF")).unwrap();
        let hbi_supplied = dri.p_nom_max.value() * dri.efficiency(1).unwrap();
        let hbi_drawn = -eaf.p_nom_max.value() * eaf.efficiency(2).unwrap();
        assert_close(hbi_supplied, hbi_drawn);
    }
}

#[test]
fn test_missing_sector() {
    let nodes = nodes(&["A"]);
    let mut network = base_network(&nodes);
    let production = IndustrialProduction::new();
    let costs = costs();
    let inputs = SteelInputs {
        industrial_production: &production,
        costs: &costs,
        nodes: &nodes,
        nhours: Hours(8760.0),
    };
    let err = build_steel_pathway(&mut network, &inputs, &SteelOptions::default()).unwrap_err();
    assert!(matches!(err, SctError::MissingSector(ref s) if s == "DRI + Electric arc"));
    assert_eq!(network.stats().num_buses, 2);
}

#[test]
fn test_missing_cost_entry_leaves_network_untouched() {
    let nodes = nodes(&["A"]);
    let mut network = base_network(&nodes);
    let production = scalar_production(100.0);
    let mut costs = CostTable::new();
    for (technology, parameter, entry) in self::costs().iter() {
        if parameter != "commodity" {
            costs.insert(technology, parameter, entry.clone());
        }
    }
    let inputs = SteelInputs {
        industrial_production: &production,
        costs: &costs,
        nodes: &nodes,
        nhours: Hours(8760.0),
    };
    let err = build_steel_pathway(&mut network, &inputs, &SteelOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        SctError::MissingCost { ref technology, .. } if technology == "iron ore DRI-ready"
    ));
    assert!(err.is_missing_input());
    assert_eq!(network.stats().num_buses, 2);
    assert!(network.load("EU steel").is_none());
}

#[test]
fn test_second_build_on_same_network_is_rejected() {
    let nodes = nodes(&["A"]);
    let production = scalar_production(100.0);
    let costs = costs();
    let mut network = base_network(&nodes);
    let inputs = SteelInputs {
        industrial_production: &production,
        costs: &costs,
        nodes: &nodes,
        nhours: Hours(8760.0),
    };
    build_steel_pathway(&mut network, &inputs, &SteelOptions::default()).unwrap();
    let before = network.stats();

    let err = build_steel_pathway(&mut network, &inputs, &SteelOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        SctError::DuplicateComponent {
            kind: ComponentKind::Bus,
            ..
        }
    ));
    assert_eq!(network.stats(), before);
}

#[test]
fn test_builds_on_fresh_networks_are_identical() {
    let nodes = nodes(&["A", "B"]);
    let production = scalar_production(1000.0);
    let costs = costs();
    let options = SteelOptions {
        relocation_steel: false,
        flexibility_steel: true,
    };
    let first = build(&production, &costs, &nodes, options);
    let second = build(&production, &costs, &nodes, options);

    assert_eq!(first.buses(), second.buses());
    assert_eq!(first.loads(), second.loads());
    assert_eq!(first.stores(), second.stores());
    assert_eq!(first.links(), second.links());
}

#[test]
fn test_built_network_validates_and_forms_one_island() {
    let nodes = nodes(&["A", "B"]);
    let network = build(&scalar_production(1000.0), &costs(), &nodes, SteelOptions::default());

    let mut diag = Diagnostics::new();
    network.validate_into(&mut diag);
    assert!(!diag.has_errors(), "{diag}");
    assert!(!diag.has_warnings(), "{diag}");

    let islands = sct_core::find_islands(&network).unwrap();
    assert_eq!(islands.islands.len(), 1);
    assert_eq!(islands.islands[0].carriers, vec!["AC", "H2", "HBI", "steel"]);
}

#[test]
fn test_zero_horizon_is_flagged_not_guarded() {
    let nodes = nodes(&["A"]);
    let production = scalar_production(100.0);
    let costs = costs();
    let mut network = base_network(&nodes);
    let inputs = SteelInputs {
        industrial_production: &production,
        costs: &costs,
        nodes: &nodes,
        nhours: Hours(0.0),
    };
    build_steel_pathway(&mut network, &inputs, &SteelOptions::default()).unwrap();
    assert!(network.load("EU steel").unwrap().p_set.is_infinite());

    let mut diag = Diagnostics::new();
    network.validate_into(&mut diag);
    assert!(diag
        .warnings()
        .any(|i| i.entity.as_deref() == Some("EU steel")));
}

#[test]
fn test_short_furnace_name_in_cost_table() {
    let costs = CostTable::new()
        .with("direct reduction furnace", "electricity-input", 1.5)
        .with("direct reduction furnace", "hydrogen-input", 0.3)
        .with("direct reduction furnace", "fixed", 100.0)
        .with("direct reduction furnace", "ore-input", 1.2)
        .with(IRON_ORE, "commodity", 50.0)
        .with(ELECTRIC_ARC_FURNACE, "electricity-input", 0.8)
        .with(ELECTRIC_ARC_FURNACE, "fixed", 60.0)
        .with(ELECTRIC_ARC_FURNACE, "hbi-input", 1.1);
    let nodes = nodes(&["A", "B"]);
    let short = build(&scalar_production(1000.0), &costs, &nodes, SteelOptions::default());
    let long = build(&scalar_production(1000.0), &self::costs(), &nodes, SteelOptions::default());
    assert_eq!(short.links(), long.links());
}

#[test]
fn test_repeated_node_leaves_network_untouched() {
    let nodes = nodes(&["A", "A"]);
    let production = scalar_production(1000.0);
    let costs = costs();
    let mut network = base_network(&nodes[..1]);
    let before = network.stats();
    let inputs = SteelInputs {
        industrial_production: &production,
        costs: &costs,
        nodes: &nodes,
        nhours: Hours(8760.0),
    };
    let err = build_steel_pathway(&mut network, &inputs, &SteelOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        SctError::DuplicateComponent {
            kind: ComponentKind::Link,
            ..
        }
    ));
    assert_eq!(network.stats(), before);
    assert!(network.bus("EU steel").is_none());
}

// ===========================================================================
// Generators
// ===========================================================================

fn arb_cost_table() -> impl Strategy<Value = CostTable> {
    (
        0.1f64..10.0,
        0.0f64..5.0,
        0.0f64..1e6,
        0.0f64..5.0,
        0.0f64..500.0,
        0.1f64..10.0,
        0.0f64..1e6,
        0.0f64..5.0,
    )
        .prop_map(|(dri_e, h2, dri_fixed, ore, ore_price, eaf_e, eaf_fixed, hbi)| {
            CostTable::new()
                .with(DRI_FURNACE, "electricity-input", dri_e)
                .with(DRI_FURNACE, "hydrogen-input", h2)
                .with(DRI_FURNACE, "fixed", dri_fixed)
                .with(DRI_FURNACE, "ore-input", ore)
                .with(IRON_ORE, "commodity", ore_price)
                .with(ELECTRIC_ARC_FURNACE, "electricity-input", eaf_e)
                .with(ELECTRIC_ARC_FURNACE, "fixed", eaf_fixed)
                .with(ELECTRIC_ARC_FURNACE, "hbi-input", hbi)
        })
}

fn arb_node_production() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1e7, 1..6)
}

fn arb_options() -> impl Strategy<Value = SteelOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(relocation_steel, flexibility_steel)| {
        SteelOptions {
            relocation_steel,
            flexibility_steel,
        }
    })
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_load_rate_times_horizon_is_total_production(
        values in arb_node_production(),
        nhours in 1.0f64..10_000.0,
    ) {
        let nodes: Vec<String> = (0..values.len()).map(|i| format!("N{i}")).collect();
        let mut production = IndustrialProduction::new();
        for (node, value) in nodes.iter().zip(&values) {
            production.set(STEEL_SECTOR, node, *value);
        }
        let costs = costs();
        let mut network = base_network(&nodes);
        let inputs = SteelInputs {
            industrial_production: &production,
            costs: &costs,
            nodes: &nodes,
            nhours: Hours(nhours),
        };
        build_steel_pathway(&mut network, &inputs, &SteelOptions::default()).unwrap();

        let total: f64 = values.iter().sum();
        let rate = network.load("EU steel").unwrap().p_set;
        prop_assert!((rate * nhours - total).abs() <= 1e-9 * total.max(1.0));
    }

    #[test]
    fn prop_secondary_ports_are_never_positive(costs in arb_cost_table()) {
        let dri = ConversionParameters::direct_reduction(&costs).unwrap();
        let eaf = ConversionParameters::electric_arc_furnace(&costs).unwrap();
        prop_assert!(dri.efficiency2() <= 0.0);
        prop_assert!(eaf.efficiency2() <= 0.0);
        prop_assert!(dri.efficiency > 0.0);
        prop_assert!(eaf.efficiency > 0.0);
    }

    #[test]
    fn prop_policy_switches_shape_every_link(
        options in arb_options(),
        values in arb_node_production(),
    ) {
        let nodes: Vec<String> = (0..values.len()).map(|i| format!("N{i}")).collect();
        let mut production = IndustrialProduction::new();
        for (node, value) in nodes.iter().zip(&values) {
            production.set(STEEL_SECTOR, node, *value);
        }
        let network = build(&production, &costs(), &nodes, options);

        prop_assert_eq!(network.links().len(), 2 * nodes.len());
        prop_assert_eq!(network.stores().len(), if options.flexibility_steel { 2 } else { 0 });
        let expected_min = if options.flexibility_steel { PerUnit::ZERO } else { PerUnit::ONE };
        for link in network.links() {
            prop_assert_eq!(link.p_min_pu, expected_min);
            prop_assert_eq!(link.p_nom_max.is_finite(), !options.relocation_steel);
        }
    }
}
