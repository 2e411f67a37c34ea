//! Shared fixtures for resolution tests

use crate::chooser::{FarmCandidate, FarmChooser};
use crate::context::ResolveContext;
use crate::locator::{locate_farms, LocatedFarm};
use crate::NonInteractive;
use am_core::{AssetStatus, Config, InfrastructureObject, PropertyValue};
use am_session::MemoryGraph;
use chrono::{DateTime, Duration, TimeZone, Utc};

pub(crate) const FARM_2010: &str = "Microsoft.SharePoint.Foundation.2010.SPFarm";
pub(crate) const FARM_2013: &str = "Microsoft.SharePoint.Foundation.2013.SPFarm";
pub(crate) const SERVER_2013: &str = "Microsoft.SharePoint.Foundation.2013.SPServer";
pub(crate) const CONFIG_DB_2013: &str = "Microsoft.SharePoint.Foundation.2013.SPConfigurationDatabase";
pub(crate) const COMPUTER: &str = "Microsoft.Windows.Computer";
pub(crate) const ENGINE: &str = "Microsoft.SQLServer.DBEngine";
pub(crate) const DATABASE: &str = "Microsoft.SQLServer.Database";
pub(crate) const CLUSTER: &str = "Microsoft.Windows.Cluster";
pub(crate) const CSV: &str =
    "Microsoft.Windows.Server.ClusterSharedVolumeMonitoring.ClusterSharedVolume";

pub(crate) const STATUS: &str = "AssetStatus";

pub(crate) fn config() -> Config {
    Config::default()
}

/// `hours` after a fixed reference instant
pub(crate) fn at(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

/// Graph with the SharePoint, SQL Server and cluster classes registered and
/// every asset status enumeration value defined.
pub(crate) fn schema() -> MemoryGraph {
    let graph = MemoryGraph::new("scom01");
    graph.add_class(FARM_2010, "SharePoint 2010 Farm");
    graph.add_class(FARM_2013, "SharePoint 2013 Farm");
    graph.add_class(SERVER_2013, "SharePoint 2013 Server");
    graph.add_class(CONFIG_DB_2013, "SharePoint 2013 Configuration Database");
    graph.add_class(COMPUTER, "Windows Computer");
    graph.add_class(ENGINE, "SQL Server DB Engine");
    graph.add_class(DATABASE, "SQL Server Database");
    graph.add_class(CLUSTER, "Windows Cluster");
    graph.add_class(CSV, "Cluster Shared Volume");
    for status in AssetStatus::ALL {
        let path = status.enumeration_path("System.AssetStatus");
        graph.add_enumeration("System.Library", &path, status.as_str());
    }
    graph
}

/// Declare the asset status property, unset
pub(crate) fn with_status(graph: &MemoryGraph, object: &InfrastructureObject) {
    graph.set_property(object, STATUS, PropertyValue::Unset);
}

/// Current asset status label of an object
pub(crate) fn status_of(graph: &MemoryGraph, object: &InfrastructureObject) -> Option<String> {
    graph
        .property(object, STATUS)
        .map(|v| v.label().to_string())
}

/// A 2013 farm and what hangs off it
pub(crate) struct FarmFixture {
    pub farm: InfrastructureObject,
    pub config_db: InfrastructureObject,
    pub computers: Vec<InfrastructureObject>,
    pub web_apps: Vec<InfrastructureObject>,
}

/// Add a 2013 farm with one server per computer name and one web
/// application on each computer. Everything but the servers and the
/// configuration database declares the asset status property.
pub(crate) fn add_farm(graph: &MemoryGraph, name: &str, computer_names: &[&str]) -> FarmFixture {
    let farm = graph.add_object(FARM_2013, name);
    with_status(graph, &farm);

    let config_db = graph.add_object(CONFIG_DB_2013, &format!("{} Configuration", name));
    graph.relate(&farm, &config_db);

    let mut computers = Vec::new();
    let mut web_apps = Vec::new();
    for computer_name in computer_names {
        let server = graph.add_object(SERVER_2013, computer_name);
        graph.relate(&farm, &server);

        let computer = graph.add_object(COMPUTER, computer_name);
        graph.relate(&computer, &server);
        with_status(graph, &computer);

        let web_app = graph.add_object_with_id(
            am_core::ObjectId::random(),
            "Microsoft.SharePoint.Foundation.2013.SPWebApplication",
            &format!("{} portal", computer_name),
            &format!("WebApplication_{}", computer_name),
        );
        graph.relate(&computer, &web_app);
        with_status(graph, &web_app);

        computers.push(computer);
        web_apps.push(web_app);
    }

    FarmFixture {
        farm,
        config_db,
        computers,
        web_apps,
    }
}

/// Add a database engine hosted on a new computer
pub(crate) fn add_engine(
    graph: &MemoryGraph,
    host_name: &str,
    engine_name: &str,
    version: Option<&str>,
) -> (InfrastructureObject, InfrastructureObject) {
    let host = graph.add_object(COMPUTER, host_name);
    with_status(graph, &host);
    let engine = graph.add_object(ENGINE, engine_name);
    graph.relate(&host, &engine);
    if let Some(version) = version {
        graph.set_property(&engine, "Version", PropertyValue::Text(version.to_string()));
    }
    (host, engine)
}

/// Locate the single farm called `name`
pub(crate) async fn locate(ctx: ResolveContext<'_>, name: &str) -> LocatedFarm {
    locate_farms(ctx, Some(name), &NonInteractive)
        .await
        .unwrap()
        .remove(0)
}

/// Chooser returning a fixed answer
pub(crate) struct FixedChoice(pub Option<usize>);

impl FarmChooser for FixedChoice {
    fn choose(&self, _name: &str, _candidates: &[FarmCandidate]) -> Option<usize> {
        self.0
    }
}
