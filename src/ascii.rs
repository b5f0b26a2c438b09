/// Printable range for ASCII values and the hex dump column.
#[inline]
pub(crate) fn is_printable(byte: u8) -> bool {
    byte > 31 && byte < 128
}
