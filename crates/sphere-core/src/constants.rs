// Behavioural defaults shared by the core and the web front-end.

// Sphere layout
pub const DEFAULT_POINT_COUNT: usize = 4000;
pub const DEFAULT_RADIUS: f32 = 100.0;
pub const DEFAULT_SPIRAL_K: f32 = 120.0; // aesthetic, 120..=125 all look fine
pub const MAX_POINT_COUNT: usize = 200_000;

// Spectrum mapping
pub const DEFAULT_GAIN: f32 = 2.0;
pub const DEFAULT_BASS_GAIN: f32 = 3.5;
pub const DEFAULT_BASS_CUTOFF: usize = 0; // 0 disables bass emphasis
pub const DEFAULT_COLOR_SHIFT: f32 = 1.0; // hue offset added at full amplitude
pub const DEFAULT_SATURATION: f32 = 0.8;
pub const DEFAULT_LIGHTNESS: f32 = 0.6;
pub const DEFAULT_LIGHTNESS_BOOST: f32 = 0.0;

// Resting colour of an undisturbed point (#00f2fe)
pub const REST_HUE: f32 = 0.5078;
pub const REST_SATURATION: f32 = 1.0;
pub const REST_LIGHTNESS: f32 = 0.498;

// Rotation applied to the whole field every frame (radians)
pub const SPIN_X_PER_FRAME: f32 = 0.001;
pub const SPIN_Y_PER_FRAME: f32 = 0.003;

// Analyser
pub const DEFAULT_FFT_SIZE: u32 = 2048;
pub const MIN_FFT_SIZE: u32 = 32;
pub const MAX_FFT_SIZE: u32 = 32768;

// Track source
pub const DEFAULT_TRACK_SOURCE: &str = "https://api.yujn.cn/api/dj.php";
pub const CACHE_BUST_PARAM: &str = "t";
pub const PLACEHOLDER_LABEL: &str = "Unknown track";
pub const ENDPOINT_EXTENSIONS: &[&str] = &["php", "asp", "aspx", "jsp", "cgi"];

// Retry and timeout policy
pub const DEFAULT_MAX_AUTO_RETRIES: u32 = 2;
pub const RETRY_BASE_DELAY_MS: u32 = 1500;
pub const RETRY_MAX_DELAY_MS: u32 = 12_000;
pub const RETRY_JITTER_MS: u32 = 250;
pub const LOAD_TIMEOUT_MS: u32 = 20_000;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 2000.0; // past ORBIT_MAX_DISTANCE plus a fully displaced sphere
pub const CAMERA_EYE: [f32; 3] = [0.0, 100.0, 270.0];

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05; // fraction of remaining motion applied per frame
pub const ORBIT_RADIANS_PER_PX: f32 = 0.005;
pub const ORBIT_ZOOM_PER_WHEEL: f32 = 0.001;
pub const ORBIT_MIN_DISTANCE: f32 = 120.0;
pub const ORBIT_MAX_DISTANCE: f32 = 800.0;
pub const ORBIT_PITCH_LIMIT: f32 = 1.5; // just short of +-pi/2
