use std::io::Read;
use std::path::{Path, PathBuf};

use scenewire_bytecode::dump_update;
use scenewire_director::{BounceDirector, Director};

pub struct DumpArgs {
    pub file: Option<PathBuf>,
    pub demo: bool,
}

pub fn run(args: DumpArgs) {
    let bytes = if args.demo {
        BounceDirector::new().init()
    } else {
        match load_stream(args.file.as_deref()) {
            Ok(bytes) => bytes,
            Err(msg) => {
                eprintln!("error: {}", msg);
                std::process::exit(1);
            }
        }
    };

    print!("{}", dump_update(&bytes));
}

fn load_stream(path: Option<&Path>) -> Result<Vec<u8>, String> {
    let path = path.ok_or("no stream file given")?;
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(bytes);
    }
    std::fs::read(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))
}
