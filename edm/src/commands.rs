// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::builder::SchemaBundle;
use crate::config::BuildManifest;
use crate::edmx::Edmx;
use crate::model::AnnotationTarget;
use crate::model::ModelGraph;
use crate::model::StructuredKind;
use crate::model::TermRef;
use crate::Error;
use clap::Subcommand;
use std::fs::File;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build EDM model from CSDL documents and print its summary.
    Build {
        /// TOML manifest with the main document and referenced
        /// documents. Documents from the command line are appended
        /// after documents of the manifest.
        #[arg(short, long)]
        manifest: Option<PathBuf>,
        /// Print every type, term, operation and container.
        #[arg(short, long)]
        verbose: bool,
        /// CSDL documents. The first document is the main document.
        csdls: Vec<PathBuf>,
    },
}

/// Execute the command.
///
/// # Errors
///
/// Returns error if any document cannot be read or parsed, or if
/// model cannot be built.
pub fn process_command(command: &Commands) -> Result<Vec<String>, Error> {
    match command {
        Commands::Build {
            manifest,
            verbose,
            csdls,
        } => {
            let mut files = match manifest {
                Some(fname) => BuildManifest::read(fname)
                    .map_err(|e| Error::Manifest(fname.clone(), e))?
                    .documents(fname.parent().unwrap_or_else(|| Path::new(""))),
                None => Vec::new(),
            };
            files.extend(csdls.iter().cloned());
            if files.is_empty() {
                return Err(Error::AtLeastOneCsdlFileNeeded);
            }
            let schema_bundle = read_csdls(&files)?;
            let graph = schema_bundle.build().map_err(Error::build_error)?;
            Ok(summary(&graph, &files, *verbose))
        }
    }
}

fn read_csdls(files: &[PathBuf]) -> Result<SchemaBundle, Error> {
    let edmx_docs = files
        .iter()
        .map(|fname| {
            debug!(file = %fname.display(), "reading document");
            let mut file = File::open(fname).map_err(|err| Error::Io(fname.clone(), err))?;
            let mut content = String::new();
            file.read_to_string(&mut content)
                .map_err(|err| Error::Io(fname.clone(), err))?;
            Edmx::parse(&content).map_err(|e| Error::Edmx(fname.clone(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SchemaBundle { edmx_docs })
}

fn summary(graph: &ModelGraph<'_>, files: &[PathBuf], verbose: bool) -> Vec<String> {
    let mut output = Vec::new();
    for (id, model) in graph.models() {
        output.push(format!(
            "model #{}: version {}, namespaces: {}",
            id.inner(),
            model.version,
            model
                .namespaces
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output.push(format!(
            "  {} structured types, {} enum types, {} type definitions, {} terms, {} operations, {} containers, {} annotations",
            model.structured_types.len(),
            model.enum_types.len(),
            model.type_definitions.len(),
            model.terms.len(),
            model.operations.len(),
            model.containers.len(),
            model.annotations.len(),
        ));
        if !verbose {
            continue;
        }
        for t in model.structured_types.iter().map(|v| graph.structured_type(*v)) {
            let kind = match t.kind {
                StructuredKind::Entity => "entity",
                StructuredKind::Complex => "complex",
            };
            let base = t
                .base_type
                .map(|v| format!(" : {}", graph.structured_type(v).name))
                .unwrap_or_default();
            output.push(format!(
                "  {kind} {}{base} ({} properties, {} navigation properties)",
                t.name,
                t.properties.len(),
                t.navigation_properties.len()
            ));
        }
        for e in model.enum_types.iter().map(|v| graph.enum_type(*v)) {
            output.push(format!("  enum {} ({} members)", e.name, e.members.len()));
        }
        for t in model.terms.iter().map(|v| graph.term(*v)) {
            output.push(format!("  term {}", t.name));
        }
        for op in model.operations.iter().map(|v| graph.operation(*v)) {
            output.push(format!(
                "  {:?} {} ({} parameters)",
                op.kind,
                op.name,
                op.parameters.len()
            ));
        }
        for c in model.containers.iter().map(|v| graph.container(*v)) {
            output.push(format!(
                "  container {} ({} navigation sources, {} operation imports)",
                c.name,
                c.navigation_sources.len(),
                c.operation_imports.len()
            ));
        }
    }
    let unresolved_terms = graph
        .annotations()
        .filter(|(_, a)| matches!(a.term, TermRef::Unresolved(_)))
        .count();
    let unresolved_targets = graph
        .annotations()
        .filter(|(_, a)| matches!(a.target, AnnotationTarget::Unresolved(_)))
        .count();
    if unresolved_terms + unresolved_targets > 0 {
        output.push(format!(
            "{unresolved_terms} annotations with unknown terms, {unresolved_targets} annotations with unknown targets"
        ));
    }
    output.push(format!("{} documents processed", files.len()));
    output
}

#[cfg(test)]
mod test {
    use super::process_command;
    use super::Commands;
    use crate::Error;
    use std::path::PathBuf;

    #[test]
    fn test_no_documents() {
        let command = Commands::Build {
            manifest: None,
            verbose: false,
            csdls: Vec::new(),
        };
        assert!(matches!(
            process_command(&command),
            Err(Error::AtLeastOneCsdlFileNeeded)
        ));
    }

    #[test]
    fn test_missing_document() {
        let command = Commands::Build {
            manifest: None,
            verbose: true,
            csdls: vec![PathBuf::from("/nonexistent/service.xml")],
        };
        assert!(matches!(process_command(&command), Err(Error::Io(_, _))));
    }
}
