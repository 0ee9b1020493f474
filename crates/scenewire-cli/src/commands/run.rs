use log::info;

use scenewire_director::{BounceDirector, Director};
use scenewire_vm::{Player, RecordingSurface};

pub struct RunArgs {
    pub frames: u64,
    pub json: bool,
}

/// Drive the demo director through a headless player, one render pass per
/// frame, printing the recorded drawing calls.
pub fn run(args: RunArgs) {
    let mut director = BounceDirector::new();
    let mut player = Player::new();
    let mut surface = RecordingSurface::new();

    if let Err(e) = player.update(director.init()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    info!("session established, {} macros", player.macro_count());

    for frame in 0..args.frames {
        let stream = director.update();
        if let Err(e) = player.update(stream) {
            eprintln!("error: frame {}: {}", frame, e);
            std::process::exit(1);
        }
        if let Err(e) = player.render(&mut surface) {
            eprintln!("error: frame {}: {}", frame, e);
            std::process::exit(1);
        }

        let calls = surface.take_calls();
        if args.json {
            let line = serde_json::to_string(&calls).expect("surface calls serialize");
            println!("{}", line);
        } else {
            println!("frame {}", frame);
            for call in &calls {
                println!("  {:?}", call);
            }
        }
    }
}
