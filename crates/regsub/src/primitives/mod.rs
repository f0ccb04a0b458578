// Host-facing primitives
// regexp: regexp?, regexp, regexp-compile, regexp-match?, regexp-match,
//         regexp-replace, regexp-replace*, regexp-replace-n, regexp-replace-range
// posix:  posix-popen, posix-pclose, read-line, write-string

pub mod posix_popen;
pub mod regexp;
