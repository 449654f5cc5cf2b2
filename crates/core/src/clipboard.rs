use color_eyre::eyre;

/// Destination for the "copy address" helper.
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> eyre::Result<()>;
}
