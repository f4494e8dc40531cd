use std::io::{self, Read, Write};

use log::{debug, warn};
use ubx_nav::{
    constants::MAX_PAYLOAD_LEN, dispatch, DispatchError, Dispatched, NavStore, Parser,
    ParserConfig,
};

/// Byte source feeding the decode loop: a serial port or a capture file
pub struct Device<R: Read> {
    port: R,
    parser: Parser,
    store: NavStore,
}

impl<R: Read> Device<R> {
    pub fn new(port: R, config: ParserConfig) -> Self {
        Device {
            port,
            parser: Parser::new(config),
            store: NavStore::new(),
        }
    }

    pub fn store(&self) -> &NavStore {
        &self.store
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Drain whatever the port has buffered, dispatching every completed frame.
    /// Returns `Ok(false)` once the source reports end of input.
    pub fn update<F: FnMut(Dispatched, &NavStore)>(&mut self, mut on_update: F) -> io::Result<bool> {
        let mut local_buf = [0; MAX_PAYLOAD_LEN as usize];
        let nbytes = match self.port.read(&mut local_buf) {
            Ok(0) => return Ok(false),
            Ok(n) => n,
            // Serial reads time out when the receiver is quiet
            Err(e) if e.kind() == io::ErrorKind::TimedOut => return Ok(true),
            Err(e) => return Err(e),
        };

        for res in self.parser.consume(&local_buf[..nbytes]) {
            match res {
                Ok(frame) => match dispatch(&frame, &self.store) {
                    Ok(what) => on_update(what, &self.store),
                    Err(e @ DispatchError::UnimplementedClass { .. }) => debug!("{}", e),
                    Err(e) => warn!("Ignoring frame: {}", e),
                },
                Err(e) => {
                    warn!("Malformed frame, ignore it; cause {}", e);
                },
            }
        }
        Ok(true)
    }
}

impl<R: Read + Write> Device<R> {
    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.port.write_all(data)
    }
}
