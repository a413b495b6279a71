use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use tracing::{info, span, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use vnode::counter::{self, Actions, State};
use vnode::host::Document;
use vnode::{detailed_diff, render, same_markup, structurally_equal};

struct Args {
    pub trace: bool,
    pub clicks: u32,
}

type BoxError = Box<dyn std::error::Error>;

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("usage: vnode-demo [--trace|-t] [--clicks|-c N]");
            return ExitCode::FAILURE;
        }
    };
    if args.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .finish()
            .init();
        info!("Logger initialized");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    let args = Args {
        trace: pargs.contains(["--trace", "-t"]),
        clicks: pargs.opt_value_from_str(["--clicks", "-c"])?.unwrap_or(0),
    };
    let rest = pargs.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {:?}", rest),
        });
    }
    Ok(args)
}

fn run(args: &Args) -> Result<(), BoxError> {
    let state = Rc::new(RefCell::new(State::default()));
    let actions = Actions::new(&state);

    // Tree construction
    let dom = counter::view(&state.borrow(), &actions)?;
    let target = counter::expected_tree(&state.borrow(), &actions)?;
    println!("== Virtual DOM ==");
    println!("{:#?}", dom);
    println!("== Expected ==");
    println!("{:#?}", target);
    let diff = detailed_diff(&dom, &target);
    if diff.is_empty() {
        println!("Difference from expected: none");
    } else {
        print!("Difference from expected:\n{}", diff);
    }
    println!("Built the expected tree: {}", structurally_equal(&dom, &target));

    // Materialization
    let mut doc = Document::new();
    let real = render(&mut doc, &counter::view, &*state.borrow(), &actions)?;
    let expected = doc.parse_fragment(&counter::expected_markup(state.borrow().count))?;
    println!("== Real DOM ==");
    println!("{}", doc.outer_html(real)?);
    println!("{}", doc.outer_html(expected)?);
    println!("Built the expected DOM: {}", same_markup(&doc, &real, &expected)?);

    if args.clicks > 0 {
        let span = span!(Level::DEBUG, "Clicking", clicks = args.clicks);
        let _enter = span.enter();
        let button = doc
            .children(real)
            .get(1)
            .copied()
            .ok_or("counter has no button")?;
        for _ in 0..args.clicks {
            doc.dispatch_event(button, "click")?;
        }
        let updated = render(&mut doc, &counter::view, &*state.borrow(), &actions)?;
        println!("== After {} click(s) ==", args.clicks);
        println!("{}", doc.outer_html(updated)?);
    }
    Ok(())
}
