use std::ffi::OsString;

use clap::{clap_app, crate_authors, crate_version, crate_description};


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
	Help(Box<str>),
	Version(Box<str>),
	Run(Args),
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Args {
	/// Log derivations and dispatch.
	pub verbose: bool,
	pub action: Action,
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
	/// List the natives.
	List,
	/// Augment a native with a spec, and optionally call the result.
	Augment {
		native: Box<str>,
		spec: Box<str>,
		call: Option<Box<str>>,
		json: bool,
	},
	/// Run a typechecker on a value.
	Check {
		datatype: Box<str>,
		value: Box<str>,
	},
}


pub fn parse<A, T>(args: A) -> clap::Result<Command>
where
	A: IntoIterator<Item = T>,
	T: Into<OsString> + Clone
{
	let app = clap_app!(
		Reframe =>
			(version: crate_version!())
			(author: crate_authors!())
			(about: crate_description!())
			(@setting SubcommandRequiredElseHelp)
			(@arg verbose: -v --verbose "Log derivations and dispatch.")
			(@subcommand list =>
				(about: "List the natives and their interfaces."))
			(@subcommand augment =>
				(about: "Augment a native with the parameters of a spec.")
				(@arg NATIVE: +required "The native to augment.")
				(@arg SPEC: +required "The spec, in textual notation.")
				(@arg call: --call +takes_value "Call the result with these arguments.")
				(@arg json: --json "Print the interface as JSON."))
			(@subcommand check =>
				(about: "Build a typechecker and run it on a value.")
				(@arg TYPE: +required "A datatype or typeset, such as integer! or any-word!.")
				(@arg VALUE: +required "The value to check."))
	);

	match app.get_matches_from_safe(args) {
		Ok(matches) => {
			let action = match matches.subcommand() {
				("augment", Some(augment)) => Action::Augment {
					native: augment.value_of("NATIVE").unwrap_or_default().into(),
					spec: augment.value_of("SPEC").unwrap_or_default().into(),
					call: augment.value_of("call").map(Into::into),
					json: augment.is_present("json"),
				},

				("check", Some(check)) => Action::Check {
					datatype: check.value_of("TYPE").unwrap_or_default().into(),
					value: check.value_of("VALUE").unwrap_or_default().into(),
				},

				_ => Action::List,
			};

			Ok(
				Command::Run(
					Args {
						verbose: matches.is_present("verbose"),
						action,
					}
				)
			)
		}

		Err(error) => match error.kind {
			clap::ErrorKind::HelpDisplayed => Ok(
				Command::Help(error.message.into_boxed_str())
			),
			clap::ErrorKind::VersionDisplayed => Ok(
				Command::Version(error.message.into_boxed_str())
			),
			_ => Err(error)
		}
	}
}
