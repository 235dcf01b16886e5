use std::{
	fmt::{self, Debug, Display},
	sync::atomic::{AtomicBool, Ordering},
};

use termion::color as term;
pub use termion::color::{Blue, Cyan, Green, Magenta, Red, Yellow};


static ENABLED: AtomicBool = AtomicBool::new(true);


/// Enable or disable colored output for the whole process.
pub fn set_enabled(enabled: bool) {
	ENABLED.store(enabled, Ordering::Relaxed);
}


/// Enable colors only if the given stream is a terminal.
pub fn detect<S: std::os::unix::io::AsRawFd>(stream: &S) {
	set_enabled(termion::is_tty(stream));
}


fn enabled() -> bool {
	ENABLED.load(Ordering::Relaxed)
}


/// Paint the foreground with a given color when formatting the value.
/// When colors are disabled, the value is written as is.
pub struct Fg<C, T>(pub C, pub T);


impl<C, T> Fg<C, T>
where
	C: term::Color + Copy,
{
	fn paint<F>(&self, f: &mut fmt::Formatter, write: F) -> fmt::Result
	where
		F: FnOnce(&T, &mut fmt::Formatter) -> fmt::Result,
	{
		if !enabled() {
			return write(&self.1, f);
		}

		write!(f, "{}", term::Fg(self.0))?;
		write(&self.1, f)?;
		write!(f, "{}", term::Fg(term::Reset))
	}
}


impl<C, T> Debug for Fg<C, T>
where
	C: term::Color + Copy,
	T: Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.paint(f, T::fmt)
	}
}


impl<C, T> Display for Fg<C, T>
where
	C: term::Color + Copy,
	T: Display,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.paint(f, T::fmt)
	}
}
