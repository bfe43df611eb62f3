use clap::Parser;
use modalert::AnimationKind;

#[derive(Parser, Debug)]
#[command(name = "modalert", version, about = "Modal alert dialogs in the terminal")]
pub struct Args {
    /// Alert title
    #[arg(short, long, default_value = "Delete file?")]
    pub title: String,

    /// Image identifier shown above the title
    #[arg(short, long)]
    pub image: Option<String>,

    /// Number of buttons (three or more stack vertically)
    #[arg(short, long, default_value_t = 2)]
    pub buttons: usize,

    /// Entrance animation, overrides the config file
    #[arg(short, long, value_enum)]
    pub animation: Option<AnimationKind>,

    /// Theme name (e.g., "Catppuccin Mocha"), overrides the config file
    #[arg(long)]
    pub theme: Option<String>,
}
