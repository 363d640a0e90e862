//! Static elog bodies used across harnesses.
//!
//! Each body mirrors what Portage's `save` module writes: optional preamble
//! lines, then `<CLASS>: <stage>` headers each followed by message lines.

/// One error section, nothing else.
pub const BODY_ERROR: &str = "ERROR: postinst\nsomething failed\n";

/// A warning followed by an info section.
pub const BODY_WARN_INFO: &str = "\
WARN: preinst
config file changed

INFO: postinst
Please run etc-update.
";

/// Only `LOG:` sections.
pub const BODY_LOG: &str = "LOG: setup\nCompiling with -O2\n";

/// Every class in one file, with a preamble and a link-worthy line.
pub const BODY_MIXED: &str = "\
Emerged at Mon Jan 1 00:00:00 2024
INFO: setup
See https://wiki.gentoo.org/wiki/Foo for details.
WARN: compile
Upstream bug #123456 is still open.
LOG: install
Installing into /usr
ERROR: postinst
Run emerge --config sys-apps/bar, then retry.
";

/// Text with no recognised headers at all.
pub const BODY_PLAIN: &str = "just some words\nno markers here\n";

/// All bodies, for property-style loops.
pub const BODIES: &[&str] = &[BODY_ERROR, BODY_WARN_INFO, BODY_LOG, BODY_MIXED, BODY_PLAIN];
