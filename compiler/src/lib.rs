//! Complete compilation pipeline
//!
//! Runs the front end, the semantic analysis and the CASL II back end in
//! order, stopping at the first error. The optional reports (token counts,
//! pretty-printed source, cross-reference, symbol table) are collected along
//! the way.

use snafu::Snafu;

use back_end::CodegenError;
use front_end::diagnostics_reporter::DiagnosticReporter;
use front_end::error::ParseError;
use front_end::lexer::{LexError, Lexer};
use front_end::parser::Parser;
use front_end::pretty_print::pretty_print;
use front_end::source_manager::SourceManager;
use front_end::token_stats::TokenStats;
use middle_end::symbol_export::export_symbols;
use middle_end::{analyze, SemanticError};

/// Any error that stops a compilation.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum CompileError {
    #[snafu(context(false), display("{source}"))]
    Lex { source: LexError },

    #[snafu(context(false), display("{source}"))]
    Parse { source: ParseError },

    #[snafu(context(false), display("{source}"))]
    Semantic { source: SemanticError },

    #[snafu(context(false), display("{source}"))]
    Codegen { source: CodegenError },
}

impl CompileError {
    /// Source line the error refers to; generation errors have none.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::Lex { source } => Some(source.line()),
            CompileError::Parse { source } => Some(source.line()),
            CompileError::Semantic { source } => Some(source.line()),
            CompileError::Codegen { .. } => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Which optional reports to produce, and whether to log stage progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub verbose: bool,
    pub xref: bool,
    pub symbols: bool,
    pub tokens: bool,
    pub pretty: bool,
}

/// Everything a successful compilation produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    pub assembly: String,
    pub xref: Option<String>,
    pub symbols: Option<String>,
    pub tokens: Option<String>,
    pub pretty: Option<String>,
}

/// The complete compilation pipeline
pub struct CompilationPipeline {
    source_manager: SourceManager,
    options: CompileOptions,
}

impl CompilationPipeline {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            source_manager: SourceManager::new(),
            options,
        }
    }

    /// Set source code to compile
    pub fn with_source(&mut self, filename: &str, source: &str) -> &mut Self {
        self.source_manager.set_source(filename, source);
        self
    }

    fn log(&self, message: &str) {
        if self.options.verbose {
            eprintln!("{}", message);
        }
    }

    /// Run the entire compilation pipeline
    pub fn compile(&self) -> CompileResult<CompileOutput> {
        let mut output = CompileOutput::default();

        // Step 1: Front end
        self.log("Performing lexical analysis...");
        let tokens = Lexer::new(self.source_manager.source()).scan_tokens()?;
        self.log(&format!("Generated {} tokens", tokens.len()));
        if self.options.tokens {
            output.tokens = Some(TokenStats::collect(&tokens).to_string());
        }

        self.log("Performing syntax parsing...");
        let program = Parser::new(&tokens).parse_program()?;
        self.log(&format!(
            "Parsed program '{}' with {} statements",
            program.name.name,
            program.block.body.statements.len()
        ));
        if self.options.pretty {
            output.pretty = Some(pretty_print(&program));
        }

        // Step 2: Semantic analysis
        self.log("Performing semantic analysis...");
        let analysis = analyze(&program)?;
        self.log(&format!("Resolved {} symbols", analysis.program.symbols.len()));
        if self.options.xref {
            output.xref = Some(analysis.xref.to_string());
        }
        if self.options.symbols {
            output.symbols = Some(export_symbols(&analysis.program.symbols));
        }

        // Step 3: Code generation
        self.log("Generating CASL II code...");
        output.assembly = back_end::generate(&analysis.program)?;
        self.log("Compilation completed successfully!");

        Ok(output)
    }

    /// Render an error against the loaded source.
    pub fn report(&self, error: &CompileError) -> String {
        let reporter = DiagnosticReporter::new(self.source_manager.clone());
        reporter.report_error(error, error.line().unwrap_or(0))
    }
}

/// Compile a source string with default options.
pub fn compile(source: &str) -> CompileResult<String> {
    let mut pipeline = CompilationPipeline::new(CompileOptions::default());
    pipeline.with_source("", source);
    Ok(pipeline.compile()?.assembly)
}
