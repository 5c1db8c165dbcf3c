// Lskbd CLI
// Lists input devices and resolves keyboard event files

use std::error::Error;
use std::path::Path;
use std::process;

use clap::{ArgGroup, Parser};
use lskbd_core::{format, is_keyboard, Device, SysfsScanner, PROC_INPUT_DEVICES};

/// List Linux input devices and keyboard event files
#[derive(Parser, Debug)]
#[command(name = "lskbd")]
#[command(version)]
#[command(about = "List Linux input devices and keyboard event files", long_about = None)]
#[command(group(ArgGroup::new("mode").args(["list_kbd", "list_all", "hawck_args"])))]
struct Args {
    /// List all keyboards
    #[arg(short = 'k', long)]
    list_kbd: bool,

    /// List all input devices
    #[arg(short = 'a', long)]
    list_all: bool,

    /// Output as JSON instead of the structured dump
    #[arg(short = 'j', long, requires = "mode", conflicts_with = "hawck_args")]
    json: bool,

    /// Print out arguments for hawck-inputd
    #[arg(long)]
    hawck_args: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn print_devices(devices: &[Device], json: bool) {
    if json {
        println!("{}", format::json(devices));
    } else {
        print!("{}", format::structured_dump(devices));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version exit 0; usage errors also go to stdout
            // and exit 1
            if err.use_stderr() {
                print!("{}", err.render());
                process::exit(1);
            }
            let _ = err.print();
            process::exit(0);
        }
    };

    init_logging(args.verbose);

    let scanner = SysfsScanner::new();
    let devices = lskbd_core::list_devices(Path::new(PROC_INPUT_DEVICES), &scanner)?;
    log::debug!("found {} input device(s)", devices.len());

    if args.list_all {
        print_devices(&devices, args.json);
        return Ok(());
    }

    let keyboards: Vec<Device> = devices.into_iter().filter(|d| is_keyboard(d)).collect();
    log::debug!("{} keyboard device(s) after filtering", keyboards.len());

    if args.hawck_args {
        let rendered = format::hawck_args(&keyboards);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    } else if args.list_kbd {
        print_devices(&keyboards, args.json);
    } else {
        print!("{}", format::plain(&keyboards));
    }

    Ok(())
}
