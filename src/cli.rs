use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Builds EA-PS UHS voltage-ramp sequences")]
pub struct Args {
    /// Path to settings TOML
    #[arg(long, default_value = "sequencer.toml")]
    pub config: String,

    /// Run without GUI (headless)
    #[arg(long, default_value_t = false)]
    pub nogui: bool,

    /// Step list CSV (start_voltage,final_voltage,step_time); required with --nogui
    #[arg(long)]
    pub steps: Option<String>,

    /// Number of additional passes over the step list
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub repeat: String,

    /// Sequence CSV output path, `-` for stdout (defaults to export.sequence_file)
    #[arg(long)]
    pub out: Option<String>,

    /// Also render the voltage profile to this PNG
    #[arg(long)]
    pub plot: Option<String>,
}
