mod args;

use gc::Gc;

use reframe::{
	fmt,
	report::Report,
	runtime::{action::Action, value::Value, Error, Panic, Runtime},
	symbol::Symbol,
	term::color,
};

use args::{Args, Command};


fn main() -> ! {
	let command = match args::parse(std::env::args_os()) {
		Ok(command) => command,
		Err(error) => {
			eprint!("{}", error);
			std::process::exit(1)
		}
	};

	let args = match command {
		Command::Run(args) => args,
		Command::Help(msg) | Command::Version(msg) => {
			println!("{}", msg);
			std::process::exit(0)
		},
	};

	let level = if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };

	if let Err(error) = simple_logger::SimpleLogger::new().with_level(level).init() {
		eprintln!("{}: {}", color::Fg(color::Red, "Error"), error);
	}

	color::detect(&std::io::stdout());

	std::process::exit(run(args))
}


/// The reasons the command may fail, each with its own exit code.
#[derive(Debug)]
enum Failure {
	Usage(String),
	Output(serde_json::Error),
	Construction(Error),
	Panic(Panic),
}


impl Failure {
	fn exit_code(&self) -> i32 {
		match self {
			Self::Usage(_) | Self::Output(_) => 1,
			Self::Construction(_) => 2,
			Self::Panic(_) => 3,
		}
	}
}


impl From<Error> for Failure {
	fn from(error: Error) -> Self {
		Self::Construction(error)
	}
}


impl From<Panic> for Failure {
	fn from(panic: Panic) -> Self {
		Self::Panic(panic)
	}
}


fn run(args: Args) -> i32 {
	let mut runtime = match Runtime::new() {
		Ok(runtime) => runtime,
		Err(error) => {
			eprintln!("{}", error);
			return 2;
		}
	};

	let result = match args.action {
		args::Action::List => {
			list(&runtime);
			Ok(())
		}

		args::Action::Augment { native, spec, call, json } => augment(
			&mut runtime,
			&native,
			&spec,
			call.as_deref(),
			json,
		),

		args::Action::Check { datatype, value } => check(&mut runtime, &datatype, &value),
	};

	match result {
		Ok(()) => 0,

		Err(failure) => {
			match &failure {
				Failure::Usage(message) => eprintln!("{}: {}", color::Fg(color::Red, "Error"), message),
				Failure::Output(error) => eprintln!("{}: {}", color::Fg(color::Red, "Error"), error),
				Failure::Construction(error) => eprintln!("{}", fmt::Show(error, runtime.interner())),
				Failure::Panic(panic) => eprintln!("{}", fmt::Show(panic, runtime.interner())),
			}

			failure.exit_code()
		}
	}
}


fn list(runtime: &Runtime) {
	for native in runtime.natives() {
		describe(runtime, native);
	}
}


fn describe(runtime: &Runtime, action: &Gc<Action>) {
	let interner = runtime.interner();

	println!("{}", fmt::Show(&**action, interner));

	if let Some(description) = action.description() {
		println!("    {}", description);
	}

	print!("{}", fmt::Show(&**action.paramlist(), interner));
}


fn augment(
	runtime: &mut Runtime,
	native: &str,
	spec: &str,
	call: Option<&str>,
	json: bool,
) -> Result<(), Failure> {
	let source = runtime
		.native(native)
		.ok_or_else(|| Failure::Usage(format!("unknown native '{}'", native)))?;

	let spec = runtime.read_spec(spec)?;
	let action = runtime.augment(&source, &spec)?;

	if json {
		let report = Report::new(&action, runtime.interner());
		let json = serde_json::to_string_pretty(&report).map_err(Failure::Output)?;
		println!("{}", json);
	} else {
		describe(runtime, &action);
	}

	if let Some(call) = call {
		let arguments = runtime.read_spec(call)?;
		let (positional, named) = split_arguments(arguments)?;

		let value = runtime.call(&action, positional, named)?;
		println!("{}", fmt::Show(&value, runtime.interner()));
	}

	Ok(())
}


fn check(runtime: &mut Runtime, datatype: &str, value: &str) -> Result<(), Failure> {
	let descriptor = single(runtime.read_spec(datatype)?, "a single datatype or typeset")?;
	let checker = runtime.make_typechecker(&descriptor)?;

	let value = single(runtime.read_spec(value)?, "a single value")?;
	let result = runtime.call(&checker, vec![value], Vec::new())?;

	println!("{}", fmt::Show(&result, runtime.interner()));

	Ok(())
}


/// Expect exactly one value.
fn single(mut values: Vec<Value>, expected: &str) -> Result<Value, Failure> {
	match values.pop() {
		Some(value) if values.is_empty() => Ok(value),
		_ => Err(Failure::Usage(format!("expected {}", expected))),
	}
}


/// Split call arguments into positional ones and named ones. A refinement names the value
/// that follows it.
fn split_arguments(arguments: Vec<Value>) -> Result<(Vec<Value>, Vec<(Symbol, Value)>), Failure> {
	let mut positional = Vec::new();
	let mut named = Vec::new();
	let mut arguments = arguments.into_iter();

	while let Some(argument) = arguments.next() {
		match argument {
			Value::Refinement(name) => match arguments.next() {
				Some(value) => named.push((name, value)),
				None => return Err(Failure::Usage("refinement without a value".into())),
			},

			value => positional.push(value),
		}
	}

	Ok((positional, named))
}
