use dotenv::dotenv;
use geo_viewer::api::{places, rutas as rutas_api, ApiClient};
use geo_viewer::map::{command_channel, FocusResolver, MapCommandReceiver};
use geo_viewer::planner::{leg_labels, summarize, Location, TripPlanner};
use geo_viewer::rutas::RouteSelection;
use geo_viewer::AppConfig;
use std::io::{self, Write};

#[tokio::main]
async fn main() {
    // Cargar las variables desde el archivo .env
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::load();
    let api = ApiClient::new(config.api_url.clone());

    loop {
        println!("Geo Viewer Console App");
        println!("1. Search places by name");
        println!("2. Find nearby routes");
        println!("3. Show route detail");
        println!("4. Plan a trip");
        println!("5. Exit");
        print!("Choose an option: ");
        io::stdout().flush().unwrap();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice).unwrap();
        let choice = choice.trim();

        match choice {
            "1" => {
                print!("Enter place name: ");
                io::stdout().flush().unwrap();
                let mut name = String::new();
                io::stdin().read_line(&mut name).unwrap();
                let name = name.trim();

                match places::search_places(&api, name, &places::SearchPlacesParams::default()).await {
                    Ok(response) => {
                        for result in response.results {
                            println!(
                                "Found: {} (Longitude: {}, Latitude: {})",
                                result.name, result.lng, result.lat
                            );
                        }
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            "2" => {
                if let Some((lat, lng, radius_km)) = read_coordinates_and_radius() {
                    match rutas_api::nearby_routes(&api, lat, lng, Some(radius_km)).await {
                        Ok(response) => {
                            for ruta in response.routes {
                                println!(
                                    "Nearby: {} {} ({} m)",
                                    ruta.codigo, ruta.nombre, ruta.distancia_m
                                );
                            }
                        }
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
            }
            "3" => {
                print!("Enter route code: ");
                io::stdout().flush().unwrap();
                let mut codigo = String::new();
                io::stdin().read_line(&mut codigo).unwrap();
                let codigo = codigo.trim();

                match rutas_api::route_by_code(&api, codigo).await {
                    Ok(detail) => match RouteSelection::from_detail(detail) {
                        Some(selection) => {
                            println!("Route {}:", selection.codigo);
                            for variant in &selection.variants {
                                println!(
                                    "  {} {} ({})",
                                    variant.properties.sentido,
                                    variant.properties.nombre_de,
                                    variant.properties.subtipo
                                );
                            }
                        }
                        None => println!("No variants found for {}", codigo),
                    },
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            "4" => {
                if !config.feature_trip_planner {
                    println!("Trip planner is disabled in the configuration.");
                    continue;
                }
                if let Some((origin, destination)) = read_trip_endpoints() {
                    plan_trip(&api, origin, destination).await;
                }
            }
            "5" => break,
            _ => println!("Invalid choice, please try again."),
        }
    }
}

async fn plan_trip(api: &ApiClient, origin: Location, destination: Location) {
    let (tx, rx) = command_channel();
    let mut planner = TripPlanner::new(FocusResolver::default(), tx);
    planner.set_origin(Some(origin));
    planner.set_destination(Some(destination));

    match planner.plan(api).await {
        Ok(true) => {
            if let Some(plan) = &planner.plan {
                for (index, option) in plan.options.iter().enumerate() {
                    let summary = summarize(option);
                    println!(
                        "Option {}: {} | walk {} | {} transfers | confidence {}",
                        index + 1,
                        summary.duration,
                        summary.walking,
                        summary.transfers,
                        summary.confidence.label()
                    );
                    for (leg, label) in option.legs.iter().zip(leg_labels(&option.legs)) {
                        match &leg.route_code {
                            Some(code) => println!("  {} - Ruta {}", label, code),
                            None => println!("  {} - {:.0} m", label, leg.distance_m),
                        }
                    }
                }
            }
            drain_map_commands(rx);
        }
        Ok(false) => println!("Plan request was superseded before it finished."),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn drain_map_commands(mut rx: MapCommandReceiver) {
    while let Ok(command) = rx.try_recv() {
        println!("Map command: {:?}", command);
    }
}

fn read_coordinates_and_radius() -> Option<(f64, f64, f64)> {
    let lat = prompt_for_float("Enter latitude: ")?;
    let lng = prompt_for_float("Enter longitude: ")?;
    let radius_km = prompt_for_float("Enter radius (in km): ")?;
    Some((lat, lng, radius_km))
}

fn read_trip_endpoints() -> Option<(Location, Location)> {
    let origin_lat = prompt_for_float("Enter origin latitude: ")?;
    let origin_lng = prompt_for_float("Enter origin longitude: ")?;
    let destination_lat = prompt_for_float("Enter destination latitude: ")?;
    let destination_lng = prompt_for_float("Enter destination longitude: ")?;
    Some((
        Location::new(origin_lat, origin_lng),
        Location::new(destination_lat, destination_lng),
    ))
}

fn prompt_for_float(prompt: &str) -> Option<f64> {
    print!("{}", prompt);
    io::stdout().flush().unwrap();

    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    match input.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("Invalid input. Please enter a valid number.");
            None
        }
    }
}
