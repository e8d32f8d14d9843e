use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const COSTS: &str = "\
technology,parameter,value,unit,source
direct iron reduction furnace,electricity-input,1.5,MWh_el/t_hbi,test
direct iron reduction furnace,hydrogen-input,0.3,MWh_H2/t_hbi,test
direct iron reduction furnace,fixed,100,EUR/t_hbi/a,test
direct iron reduction furnace,ore-input,1.2,t_ore/t_hbi,test
iron ore DRI-ready,commodity,50,EUR/t,test
electric arc furnace,electricity-input,0.8,MWh_el/t_steel,test
electric arc furnace,fixed,60,EUR/t_steel/a,test
electric arc furnace,hbi-input,1.1,t_hbi/t_steel,test
";

struct Fixture {
    costs: PathBuf,
    production: PathBuf,
    nodes: PathBuf,
}

fn fixture(dir: &Path) -> Fixture {
    let fx = Fixture {
        costs: dir.join("costs.csv"),
        production: dir.join("industrial_production.csv"),
        nodes: dir.join("nodes.txt"),
    };
    fs::write(&fx.costs, COSTS).unwrap();
    fs::write(&fx.production, "node,DRI + Electric arc\nA,500\nB,500\n").unwrap();
    fs::write(&fx.nodes, "A\nB\n").unwrap();
    fx
}

#[test]
fn sct_help_lists_commands() {
    cargo_bin_cmd!("sct")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("steel"))
        .stdout(predicate::str::contains("graph"));
}

#[test]
fn sct_without_command_prints_help() {
    cargo_bin_cmd!("sct")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("steel"));
}

#[test]
fn sct_steel_build_writes_network() {
    let dir = tempdir().unwrap();
    let fx = fixture(dir.path());
    let out = dir.path().join("network.json");

    cargo_bin_cmd!("sct")
        .args(["steel", "build", "--costs"])
        .arg(&fx.costs)
        .arg("--production")
        .arg(&fx.production)
        .arg("--nodes")
        .arg(&fx.nodes)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Steel pathway added for 2 node(s)"))
        .stdout(predicate::str::contains("Links         : 4"))
        .stdout(predicate::str::contains("Stores        : 0"))
        .stderr(predicate::str::contains("Steel industry relocation not activated."));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let links = document["links"].as_array().unwrap();
    assert_eq!(links.len(), 4);
    assert_eq!(links[0]["name"], "A DRI");
    assert_eq!(document["loads"][0]["name"], "EU steel");

    cargo_bin_cmd!("sct")
        .args(["graph", "islands"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Island 0"))
        .stdout(predicate::str::contains("Island 1").not());

    cargo_bin_cmd!("sct")
        .args(["graph", "export"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph sct_network"));
}

#[test]
fn sct_steel_build_with_config_and_json_report() {
    let dir = tempdir().unwrap();
    let fx = fixture(dir.path());
    let config = dir.path().join("config.yaml");
    fs::write(&config, "sector:\n  flexibility_steel: true\n").unwrap();

    let output = cargo_bin_cmd!("sct")
        .args(["steel", "build", "--json", "--relocation", "--costs"])
        .arg(&fx.costs)
        .arg("--production")
        .arg(&fx.production)
        .arg("--nodes")
        .arg(&fx.nodes)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["policy"]["no_relocation"], false);
    assert_eq!(report["policy"]["no_flexibility"], false);
    assert_eq!(report["stores"].as_array().unwrap().len(), 2);
}

#[test]
fn sct_steel_build_reports_missing_cost() {
    let dir = tempdir().unwrap();
    let fx = fixture(dir.path());
    fs::write(&fx.costs, "technology,parameter,value\nelectric arc furnace,fixed,60\n").unwrap();

    cargo_bin_cmd!("sct")
        .args(["steel", "build", "--costs"])
        .arg(&fx.costs)
        .arg("--production")
        .arg(&fx.production)
        .arg("--nodes")
        .arg(&fx.nodes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("direct reduction furnace"));
}

#[test]
fn sct_steel_inspect_options_defaults() {
    cargo_bin_cmd!("sct")
        .args(["steel", "inspect-options"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"no_relocation\": true"))
        .stdout(predicate::str::contains("\"no_flexibility\": true"));
}
