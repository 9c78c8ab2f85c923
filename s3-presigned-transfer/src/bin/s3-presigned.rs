/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;
use s3_presigned_transfer::display::{
    format_duration, truncate_url, ByteUnit, ConsoleProgress, DisplayOptions,
};
use s3_presigned_transfer::error::{Error, ErrorKind};
use s3_presigned_transfer::operation::download::ObjectMetadata;
use s3_presigned_transfer::presign::{
    default_object_key, IssuePresignedUrl, PresignRequest, PresignedUrl, S3UrlIssuer,
};
use s3_presigned_transfer::types::TransferOutcome;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "s3-presigned")]
#[command(about = "Issues Amazon S3 presigned URLs and transfers single files through them.")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show full URLs and debug logging
    #[arg(short, long, global = true, default_value_t = false, action = clap::ArgAction::SetTrue)]
    verbose: bool,

    /// Seconds allowed to establish a connection
    #[arg(long, global = true, value_name = "SECS")]
    connect_timeout: Option<u64>,

    /// Seconds allowed between two reads from the connection
    #[arg(long, global = true, value_name = "SECS")]
    read_timeout: Option<u64>,
}

#[derive(Debug, Clone, clap::Subcommand)]
enum Command {
    /// Generate a presigned URL to upload one object
    GenerateUpload {
        /// Bucket to upload into
        bucket: String,

        /// Object key [default: uploads/file-YYYYMMDD-HHMMSS]
        #[arg(short, long)]
        key: Option<String>,

        /// Validity of the URL in seconds (at most 604800, 7 days)
        #[arg(short, long, default_value_t = 3600)]
        expiration: u64,

        /// Content type the upload must be sent with
        #[arg(short = 't', long)]
        content_type: Option<String>,

        /// Print only the URL
        #[arg(short, long, default_value_t = false, action = clap::ArgAction::SetTrue)]
        quiet: bool,
    },

    /// Generate a presigned URL to download one object
    GenerateDownload {
        /// Bucket holding the object
        bucket: String,

        /// Object key
        key: String,

        /// Validity of the URL in seconds (at most 604800, 7 days)
        #[arg(short, long, default_value_t = 3600)]
        expiration: u64,

        /// File name suggested to browsers downloading the object
        #[arg(short, long)]
        filename: Option<String>,

        /// Print only the URL
        #[arg(short, long, default_value_t = false, action = clap::ArgAction::SetTrue)]
        quiet: bool,

        /// Skip checking that the object exists
        #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
        no_check: bool,
    },

    /// Upload a local file through a presigned PUT URL
    Upload {
        /// Presigned PUT URL
        url: String,

        /// File to upload
        file: PathBuf,

        /// Content type to send instead of the detected one
        #[arg(short = 't', long)]
        content_type: Option<String>,
    },

    /// Download an object through a presigned GET URL
    Download {
        /// Presigned GET URL
        url: String,

        /// File or directory to save to [default: name taken from the URL]
        destination: Option<PathBuf>,

        /// Overwrite an existing file without asking
        #[arg(short = 'y', long, default_value_t = false, action = clap::ArgAction::SetTrue)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!("parsed arguments: {:?}", args.command);

    // dropping the command future on interrupt removes any partial download
    let code = tokio::select! {
        code = run(args) => code,
        Ok(()) = tokio::signal::ctrl_c() => {
            eprintln!("\ninterrupted");
            EXIT_INTERRUPTED
        }
    };
    ExitCode::from(code)
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "s3_presigned_transfer=debug,s3_presigned=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> u8 {
    let opts = DisplayOptions::new(args.verbose);
    let result = match args.command.clone() {
        Command::GenerateUpload {
            bucket,
            key,
            expiration,
            content_type,
            quiet,
        } => {
            let key = key.unwrap_or_else(default_object_key);
            let mut request =
                PresignRequest::put(bucket, key).expires_in(Duration::from_secs(expiration));
            if let Some(content_type) = content_type {
                request = request.content_type(content_type);
            }
            generate_upload(request, quiet).await
        }
        Command::GenerateDownload {
            bucket,
            key,
            expiration,
            filename,
            quiet,
            no_check,
        } => {
            let mut request =
                PresignRequest::get(bucket, key).expires_in(Duration::from_secs(expiration));
            if let Some(filename) = filename {
                request = request.download_filename(filename);
            }
            generate_download(request, quiet, !no_check).await
        }
        Command::Upload {
            url,
            file,
            content_type,
        } => upload(&args, url, file, content_type, opts).await,
        Command::Download {
            url,
            destination,
            yes,
        } => download(&args, url, destination, yes, opts).await,
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", DisplayErrorContext(&err));
            EXIT_FAILURE
        }
    }
}

fn transfer_client(args: &Args) -> Result<s3_presigned_transfer::Client, Error> {
    let mut loader = s3_presigned_transfer::from_env();
    if let Some(secs) = args.connect_timeout {
        loader = loader.connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = args.read_timeout {
        loader = loader.read_timeout(Duration::from_secs(secs));
    }
    Ok(s3_presigned_transfer::Client::new(loader.load()?))
}

async fn generate_upload(request: PresignRequest, quiet: bool) -> Result<u8, Error> {
    let issuer = S3UrlIssuer::from_env().await;
    let url = issuer.issue_presigned_url(&request).await?;
    if quiet {
        println!("{url}");
        return Ok(EXIT_SUCCESS);
    }

    println!("Bucket:       {}", request.bucket());
    println!("Key:          {}", request.key());
    if let Some(content_type) = request.get_content_type() {
        println!("Content-Type: {content_type}");
    }
    print_url(&url);

    println!("To upload a file with this URL:");
    println!("  s3-presigned upload \"{url}\" <file>");
    match request.get_content_type() {
        Some(content_type) => println!(
            "  curl -X PUT -H \"Content-Type: {content_type}\" --upload-file <file> \"{url}\""
        ),
        None => println!("  curl -X PUT --upload-file <file> \"{url}\""),
    }
    println!();
    println!("The URL expires in {}", format_duration(url.expires_in()));
    Ok(EXIT_SUCCESS)
}

async fn generate_download(
    request: PresignRequest,
    quiet: bool,
    check_exists: bool,
) -> Result<u8, Error> {
    let issuer = S3UrlIssuer::from_env().await;

    let object_meta = if check_exists {
        match issuer
            .object_metadata(request.bucket(), request.key())
            .await?
        {
            Some(meta) => Some(meta),
            None => {
                eprintln!(
                    "error: object s3://{}/{} does not exist",
                    request.bucket(),
                    request.key()
                );
                return Ok(EXIT_FAILURE);
            }
        }
    } else {
        None
    };

    let url = issuer.issue_presigned_url(&request).await?;
    if quiet {
        println!("{url}");
        return Ok(EXIT_SUCCESS);
    }

    println!("Bucket:       {}", request.bucket());
    println!("Key:          {}", request.key());
    if let Some(meta) = &object_meta {
        print_object_meta(meta);
    }
    if let Some(filename) = request.get_download_filename() {
        println!("Saved as:     {filename}");
    }
    print_url(&url);

    println!("To download the file with this URL:");
    println!("  s3-presigned download \"{url}\"");
    println!("  curl -o <file> \"{url}\"");
    println!();
    println!("The URL expires in {}", format_duration(url.expires_in()));
    Ok(EXIT_SUCCESS)
}

async fn upload(
    args: &Args,
    url: String,
    file: PathBuf,
    content_type: Option<String>,
    opts: DisplayOptions,
) -> Result<u8, Error> {
    let client = transfer_client(args)?;

    println!("Uploading    {}", file.display());
    println!("URL:         {}", truncate_url(&url, opts));

    // the file is inspected once, by the upload itself
    let output = client
        .upload()
        .url(url)
        .path(&file)
        .set_content_type(content_type)
        .progress(Arc::new(ConsoleProgress::new()))
        .send()
        .await?;

    println!(
        "Size:        {}",
        ByteUnit::display(output.file_info().size_bytes())
    );
    println!("Content-Type: {}", output.content_type());

    Ok(report_outcome(output.outcome()))
}

async fn download(
    args: &Args,
    url: String,
    destination: Option<PathBuf>,
    overwrite: bool,
    opts: DisplayOptions,
) -> Result<u8, Error> {
    let client = transfer_client(args)?;
    println!("Downloading  {}", truncate_url(&url, opts));

    let progress = Arc::new(ConsoleProgress::new());
    let request = |overwrite: bool| {
        client
            .download()
            .url(url.clone())
            .set_destination(destination.clone())
            .overwrite(overwrite)
            .progress(progress.clone())
    };

    let output = match request(overwrite).send().await {
        Err(err) if err.kind() == &ErrorKind::DestinationExists => {
            if !confirm(&format!("{err}. Overwrite? [y/N] ")).await? {
                println!("Download cancelled, existing file kept");
                return Ok(EXIT_SUCCESS);
            }
            request(true).send().await?
        }
        result => result?,
    };

    if let Some(meta) = output.object_meta() {
        if opts.verbose {
            print_object_meta(meta);
        }
    }
    let code = report_outcome(output.outcome());
    if output.outcome().is_success() {
        println!("Saved to     {}", output.destination().display());
    }
    Ok(code)
}

fn print_url(url: &PresignedUrl) {
    println!();
    println!("Presigned {} URL:", url.method());
    println!("{url}");
    println!();
}

fn print_object_meta(meta: &ObjectMetadata) {
    if let Some(len) = meta.content_length {
        println!("Size:         {}", ByteUnit::display(len));
    }
    if let Some(content_type) = &meta.content_type {
        println!("Content-Type: {content_type}");
    }
    if let Some(last_modified) = &meta.last_modified {
        println!("Modified:     {last_modified}");
    }
}

fn report_outcome(outcome: &TransferOutcome) -> u8 {
    let category = outcome.category();
    if outcome.is_success() {
        println!(
            "{} (HTTP {})",
            category.explain(outcome.method()),
            outcome.status_display()
        );
        if let Some(bytes) = outcome.bytes_transferred() {
            println!("Transferred  {}", ByteUnit::display(bytes));
        }
    } else {
        eprintln!(
            "error: {} (HTTP {})",
            category.explain(outcome.method()),
            outcome.status_display()
        );
        if let Some(hint) = category.remediation() {
            eprintln!("hint: {hint}");
        }
    }
    if outcome.exit_code() == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

async fn confirm(question: &str) -> Result<bool, Error> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
