//! 端到端测试：从 JSON 语料到写出的源文件

use codegen_composition::{
    CorpusLoader, FileSystemArtifactWriter, GenerationPipelineBuilder, InMemoryArtifactWriter,
};
use codegen_config::GeneratorSettings;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_app.json")
}

const EXPECTED_BINDINGS: &str = "\
package com.example.data

import dagger.Binds
import dagger.Module

@Module
public interface RepoAndBindsCodeGen {
  @get:Binds
  public val RepoImpl.repo: Repository
}
";

const EXPECTED_PROVISIONS: &str = "\
package com.example.net

import com.example.di.AppScope
import com.squareup.anvil.annotations.ContributesTo
import javax.inject.Named
import okhttp3.OkHttpClient

@ContributesTo(AppScope::class)
public interface NetModuleProvisionsCodeGen0Component {
  @get:Named(\"main\")
  public val client: OkHttpClient
}
";

const EXPECTED_AUTO_WIRE: &str = "\
package com.example.login

import com.example.di.ActivityScope
import com.squareup.anvil.annotations.ContributesTo
import dagger.Binds
import dagger.MembersInjector
import dagger.Module
import dagger.multibindings.ClassKey
import dagger.multibindings.IntoMap

@Module
@ContributesTo(ActivityScope::class)
public interface LoginActivityAICodeGenModule {
  @get:Binds
  @get:IntoMap
  @get:ClassKey(LoginActivity::class)
  public val MembersInjector<LoginActivity>.membersInjector: MembersInjector<*>
}

@ContributesTo(ActivityScope::class)
public interface LoginActivityAICodeGenComponent {
  public fun LoginActivity.inject()
}
";

#[tokio::test]
async fn sample_corpus_generates_expected_sources() -> anyhow::Result<()> {
    let unit = CorpusLoader::load_file(fixture()).await?;
    let pipeline = GenerationPipelineBuilder::new()
        .with_settings(GeneratorSettings::default())
        .build()?;
    let writer = InMemoryArtifactWriter::new();

    let report = pipeline.run_and_write(unit, &writer).await?;

    assert!(report.is_success(), "{:?}", report.diagnostics);
    let files = writer.files();
    let contents: Vec<(&str, &str)> = files
        .iter()
        .map(|f| (f.file_name.as_str(), f.content.as_str()))
        .collect();
    assert_eq!(
        contents,
        [
            ("RepoAndBindsCodeGen", EXPECTED_BINDINGS),
            ("LoginActivityAICodeGen", EXPECTED_AUTO_WIRE),
            ("NetModuleProvisionsCodeGen", EXPECTED_PROVISIONS),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn sample_corpus_is_written_under_package_directories() -> anyhow::Result<()> {
    let output = TempDir::new()?;
    let unit = CorpusLoader::load_file(fixture()).await?;
    let pipeline = GenerationPipelineBuilder::new()
        .with_settings(GeneratorSettings::default())
        .build()?;
    let writer = FileSystemArtifactWriter::new(output.path());

    let report = pipeline.run_and_write(unit, &writer).await?;

    assert_eq!(
        report.written,
        [
            output.path().join("com/example/data/RepoAndBindsCodeGen.kt"),
            output.path().join("com/example/login/LoginActivityAICodeGen.kt"),
            output.path().join("com/example/net/NetModuleProvisionsCodeGen.kt"),
        ]
    );
    let written = tokio::fs::read_to_string(&report.written[2]).await?;
    assert_eq!(written, EXPECTED_PROVISIONS);
    Ok(())
}

#[tokio::test]
async fn repeated_runs_produce_identical_output() -> anyhow::Result<()> {
    let pipeline = GenerationPipelineBuilder::new()
        .with_settings(GeneratorSettings::default())
        .build()?;

    let first = pipeline.run(CorpusLoader::load_file(fixture()).await?).await?;
    let second = pipeline.run(CorpusLoader::load_file(fixture()).await?).await?;

    assert_eq!(first.files, second.files);
    Ok(())
}
