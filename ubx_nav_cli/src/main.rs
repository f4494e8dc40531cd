use anyhow::Context;
use chrono::prelude::*;
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use log::info;
use serialport::{DataBits, FlowControl, Parity, StopBits};
use std::{fs::File, io::Read, time::Duration};
use ubx_nav::*;

mod device;

use device::Device;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();

    let config = parser_config(&matches);
    let json = matches.get_flag("json");

    if let Some(path) = matches.get_one::<String>("file") {
        let file = File::open(path).with_context(|| format!("Failed to open \"{}\"", path))?;
        let mut device = Device::new(file, config);
        run(&mut device, json)?;
        info!("Replay finished: {:?}", device.parser().stats());
        return Ok(());
    }

    let mut device = open_port(&matches, config)?;
    if matches.get_flag("poll") {
        for request in [PollRequest::SecUniqId, PollRequest::NavPvt] {
            device
                .write_all(&request.into_packet_bytes())
                .with_context(|| format!("Unable to write poll request {:?}", request))?;
        }
    }
    println!("Opened receiver, waiting for messages...");
    run(&mut device, json)
}

fn cli() -> Command {
    Command::new("UBX navigation decoder")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Decodes UBX frames and prints the latest navigation solution")
        .arg_required_else_help(true)
        .arg(
            Arg::new("port")
                .value_name("port")
                .short('p')
                .long("port")
                .help("Serial port to open"),
        )
        .arg(
            Arg::new("baud")
                .value_name("baud")
                .short('s')
                .long("baud")
                .required(false)
                .default_value("9600")
                .value_parser(value_parser!(u32))
                .help("Baud rate of the port to open"),
        )
        .arg(
            Arg::new("file")
                .value_name("file")
                .short('f')
                .long("file")
                .help("Replay a binary capture instead of reading a serial port"),
        )
        .group(
            ArgGroup::new("source")
                .args(["port", "file"])
                .required(true),
        )
        .arg(
            Arg::new("poll")
                .long("poll")
                .action(ArgAction::SetTrue)
                .requires("port")
                .help("Poll the receiver for SEC-UNIQID and NAV-PVT after opening the port"),
        )
        .arg(
            Arg::new("max-payload")
                .value_name("bytes")
                .long("max-payload")
                .value_parser(value_parser!(u16))
                .help("Frames declaring a longer payload are dropped"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print every snapshot as one line of JSON"),
        )
}

fn parser_config(matches: &ArgMatches) -> ParserConfig {
    let max_payload = matches
        .get_one::<u16>("max-payload")
        .copied()
        .unwrap_or(constants::MAX_PAYLOAD_LEN);
    ParserConfig::default().with_max_payload_len(max_payload)
}

fn open_port(
    matches: &ArgMatches,
    config: ParserConfig,
) -> anyhow::Result<Device<Box<dyn serialport::SerialPort>>> {
    let port = matches
        .get_one::<String>("port")
        .context("Expected 'port' cli argument")?;
    let baud = matches.get_one::<u32>("baud").copied().unwrap_or(9600);

    let builder = serialport::new(port, baud)
        .stop_bits(StopBits::One)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .flow_control(FlowControl::None)
        .timeout(Duration::from_millis(10));
    info!("{:?}", &builder);

    let port = builder
        .open()
        .with_context(|| format!("Failed to open \"{}\"", port))?;
    Ok(Device::new(port, config))
}

fn run<R: Read>(device: &mut Device<R>, json: bool) -> anyhow::Result<()> {
    while device.update(|what, store| print_snapshot(what, &store.snapshot(), json))? {}
    Ok(())
}

fn print_snapshot(what: Dispatched, snapshot: &NavSnapshot, json: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Could not serialize snapshot: {}", e),
        }
        return;
    }

    match what {
        Dispatched::Identity => println!("Receiver ID: {}", snapshot.identity),
        Dispatched::Navigation => {
            let sol = &snapshot.navigation;
            println!(
                "Fix: {:?} Satellites: {}",
                sol.gnss_fix_type(),
                sol.num_satellites
            );
            if sol.has_position() {
                let pos: Position = sol.into();
                let vel: Velocity = sol.into();
                println!(
                    "Latitude: {:.5} Longitude: {:.5} Altitude: {:.2}m",
                    pos.lat, pos.lon, pos.alt
                );
                println!(
                    "Speed: {:.2} m/s Heading: {:.2} degrees",
                    vel.speed, vel.heading
                );
            }
            if sol.has_time() {
                match DateTime::<Utc>::try_from(sol) {
                    Ok(time) => println!("Time: {:?}", time),
                    Err(e) => eprintln!("Could not parse NAV-PVT time field to UTC: {}", e),
                }
            }
        },
    }
}
