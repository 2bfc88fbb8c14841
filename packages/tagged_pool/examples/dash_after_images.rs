//! A character dashes across the screen and leaves fading after-images behind.
//!
//! Each after-image comes from a `TaggedPool`. It is placed where the character was, fades out
//! over a few frames and returns itself to the pool once it is nearly invisible. The pool is
//! expandable, so a fast dash that needs more images than were pre-created still gets them.
//!
//! Pool activity is logged at debug level.

use tagged_pool::{ItemSpec, Key, Poolable, TaggedPool};

const AFTER_IMAGE: &str = "after_image";

const FRAME_SECONDS: f32 = 1.0 / 60.0;
const DASH_SPEED: f32 = 30.0;
const DASH_SECONDS: f32 = 0.25;
const DISTANCE_BETWEEN_IMAGES: f32 = 0.5;
const FADE_RATE: f32 = 5.0;
const RETURN_BELOW_ALPHA: f32 = 0.2;

#[derive(Debug)]
struct AfterImage {
    x: f32,
    alpha: f32,
}

impl Poolable for AfterImage {
    fn instantiate(&self) -> Self {
        Self {
            x: self.x,
            alpha: self.alpha,
        }
    }

    fn set_active(&mut self, active: bool) {
        // Every time an image is shown it starts fully opaque.
        if active {
            self.alpha = 1.0;
        }
    }
}

/// Fades every live image by one frame and returns the ones that are nearly transparent.
fn fade_images(pool: &mut TaggedPool<AfterImage>) -> usize {
    let mut returned = 0;

    for key in pool.active_keys().collect::<Vec<Key>>() {
        let image = pool.item_mut(key);
        image.alpha += (0.0 - image.alpha) * FADE_RATE * FRAME_SECONDS;

        if image.alpha <= RETURN_BELOW_ALPHA {
            pool.return_item(key);
            returned += 1;
        }
    }

    returned
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Dash After-Images Example ===");

    let mut pool = TaggedPool::builder()
        .register(
            ItemSpec::new(AFTER_IMAGE, AfterImage { x: 0.0, alpha: 0.0 })
                .amount(4)
                .expandable(true),
        )
        .build()
        .expect("tags are unique");

    let mut player_x = 0.0_f32;
    let mut last_image_x = player_x;
    let mut dash_time = 0.0_f32;
    let mut frame = 0_u32;
    let mut total_returned = 0;

    // Dash, then keep running frames until every image has faded back into the pool.
    while dash_time < DASH_SECONDS || pool.active_len() > 0 {
        frame += 1;

        if dash_time < DASH_SECONDS {
            dash_time += FRAME_SECONDS;
            player_x += DASH_SPEED * FRAME_SECONDS;

            if (player_x - last_image_x).abs() > DISTANCE_BETWEEN_IMAGES {
                // An exhausted pool would simply mean no image this frame.
                if let Some(key) = pool.get(AFTER_IMAGE) {
                    pool.item_mut(key).x = player_x;
                    last_image_x = player_x;
                    println!("frame {frame:>3}: after-image at x = {player_x:.2}");
                }
            }
        }

        total_returned += fade_images(&mut pool);
    }

    println!(
        "Dash finished after {frame} frames: {} after-images created, {total_returned} returned.",
        pool.instance_count(AFTER_IMAGE)
    );
}
