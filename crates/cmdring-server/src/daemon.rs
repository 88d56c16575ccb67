//! Classic double-fork daemonization.

use std::io;

/// Detaches the process from its controlling terminal.
///
/// Performs the standard sequence: fork (parent exits), `setsid`, ignore
/// `SIGHUP`, fork again (session leader exits), `umask(0)`, `chdir("/")`,
/// and stdio redirected to `/dev/null`. Redirecting instead of closing
/// keeps descriptors 0..=2 occupied so later opens and the log writer
/// never land on them.
///
/// Must run before any threads exist; the caller builds the async runtime
/// afterwards.
pub fn daemonize() -> io::Result<()> {
    // First fork: detach from the invoking shell's job control.
    match unsafe { libc::fork() } {
        -1 => return Err(io::Error::last_os_error()),
        0 => {}
        _parent => std::process::exit(0),
    }

    if unsafe { libc::setsid() } == -1 {
        return Err(io::Error::last_os_error());
    }

    unsafe {
        libc::signal(libc::SIGHUP, libc::SIG_IGN);
    }

    // Second fork: the session leader exits, so the daemon can never
    // reacquire a controlling terminal.
    match unsafe { libc::fork() } {
        -1 => return Err(io::Error::last_os_error()),
        0 => {}
        _leader => std::process::exit(0),
    }

    unsafe {
        libc::umask(0);
    }
    if unsafe { libc::chdir(c"/".as_ptr()) } == -1 {
        return Err(io::Error::last_os_error());
    }

    let devnull = unsafe { libc::open(c"/dev/null".as_ptr(), libc::O_RDWR) };
    if devnull == -1 {
        return Err(io::Error::last_os_error());
    }
    unsafe {
        libc::dup2(devnull, libc::STDIN_FILENO);
        libc::dup2(devnull, libc::STDOUT_FILENO);
        libc::dup2(devnull, libc::STDERR_FILENO);
        if devnull > libc::STDERR_FILENO {
            libc::close(devnull);
        }
    }

    Ok(())
}
