//! Flag parsing shared by both commands.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionArgs {
    pub input_file: String,
    pub output_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedArgs {
    Run(SessionArgs),
    Help,
    Version,
}

pub fn parse_session_args(args: &[String]) -> Result<ParsedArgs, String> {
    let mut input_file: Option<String> = None;
    let mut output_file: Option<String> = None;
    let mut idx = 0usize;

    while idx < args.len() {
        let token = args[idx].as_str();
        match token {
            "-h" | "--help" | "help" => return Ok(ParsedArgs::Help),
            "--version" => return Ok(ParsedArgs::Version),
            // Separator left over from `streamlit run tool.py -- --flags` style invocations.
            "--" => {}
            flag if flag.starts_with("--input_file=") => {
                input_file = Some(inline_flag_value(flag));
            }
            "--input_file" => {
                idx += 1;
                input_file = Some(take_flag_value(args, idx, "--input_file")?);
            }
            flag if flag.starts_with("--output_file=") => {
                output_file = Some(inline_flag_value(flag));
            }
            "--output_file" => {
                idx += 1;
                output_file = Some(take_flag_value(args, idx, "--output_file")?);
            }
            flag if flag.starts_with('-') => return Err(format!("unknown flag: {flag}")),
            other => return Err(format!("unexpected argument: {other}")),
        }
        idx += 1;
    }

    let input_file = input_file.ok_or("required flag --input_file not set")?;
    let output_file = output_file.ok_or("required flag --output_file not set")?;
    Ok(ParsedArgs::Run(SessionArgs {
        input_file,
        output_file,
    }))
}

fn take_flag_value(args: &[String], idx: usize, flag: &str) -> Result<String, String> {
    args.get(idx)
        .cloned()
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn inline_flag_value(flag: &str) -> String {
    flag.split_once('=')
        .map(|(_, value)| value.to_string())
        .unwrap_or_default()
}
