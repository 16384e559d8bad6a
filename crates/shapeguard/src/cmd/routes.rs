use shapeguard_schema::SchemaRegistry;

use crate::cmd::RoutesArgs;
use crate::exit::{schema_error, CliResult, SUCCESS};
use crate::output::{print_routes, OutputFormat, RouteInfo, RoutesReport};

pub fn run(args: RoutesArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = SchemaRegistry::from_directory(&args.dir)
        .map_err(|err| schema_error("failed loading schema directory", err))?;

    let report = RoutesReport {
        routes: route_infos(&registry),
    };
    print_routes(&report, format);

    Ok(SUCCESS)
}

fn route_infos(registry: &SchemaRegistry) -> Vec<RouteInfo> {
    registry
        .routes()
        .into_iter()
        .filter_map(|route| {
            let schema = registry.get(&route)?;
            let fields = schema.iter().map(|(name, _)| name.to_string()).collect();
            Some(RouteInfo { route, fields })
        })
        .collect()
}
