use std::io;

use mailbox_chess::uci::uci_top::run_stdio_loop;

fn main() -> io::Result<()> {
    run_stdio_loop()
}
