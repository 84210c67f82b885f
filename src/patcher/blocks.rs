//! Literal code blocks matched and injected by the attribute patch.
//!
//! The blocks are copied from `tool_executor.py` as shipped with
//! Llama Stack 0.3.5. Any whitespace change upstream makes them stop matching,
//! which is what the patcher wants: it fails instead of guessing.

/// Present once the metadata patch has been applied.
pub const METADATA_MARKER: &str = "search_result_attributes";

/// Present once the results-building patch has been applied.
pub const RESULTS_MARKER: &str = "sr_citation_files";

/// Metadata construction in `_execute_knowledge_search_via_vector_store`.
pub const METADATA_BLOCK: &str = concat!(
    "        return ToolInvocationResult(\n",
    "            content=content_items,\n",
    "            metadata={\n",
    "                \"document_ids\": [r.file_id for r in search_results],\n",
    "                \"chunks\": [r.content[0].text if r.content else \"\" for r in search_results],\n",
    "                \"scores\": [r.score for r in search_results],\n",
    "                \"citation_files\": citation_files,\n",
    "            },\n",
    "        )",
);

/// Metadata construction that also carries each result's attributes.
pub const METADATA_BLOCK_PATCHED: &str = concat!(
    "        search_result_attributes = [r.attributes or {} for r in search_results]\n",
    "\n",
    "        return ToolInvocationResult(\n",
    "            content=content_items,\n",
    "            metadata={\n",
    "                \"document_ids\": [r.file_id for r in search_results],\n",
    "                \"chunks\": [r.content[0].text if r.content else \"\" for r in search_results],\n",
    "                \"scores\": [r.score for r in search_results],\n",
    "                \"citation_files\": citation_files,\n",
    "                \"search_result_attributes\": search_result_attributes,\n",
    "            },\n",
    "        )",
);

/// Results loop in `_build_result_messages` with hard-coded filename and attributes.
pub const RESULTS_BLOCK: &str = concat!(
    "                if result and \"document_ids\" in result.metadata:\n",
    "                    message.results = []\n",
    "                    for i, doc_id in enumerate(result.metadata[\"document_ids\"]):\n",
    "                        text = result.metadata[\"chunks\"][i] if \"chunks\" in result.metadata else None\n",
    "                        score = result.metadata[\"scores\"][i] if \"scores\" in result.metadata else None\n",
    "                        message.results.append(\n",
    "                            OpenAIResponseOutputMessageFileSearchToolCallResults(\n",
    "                                file_id=doc_id,\n",
    "                                filename=doc_id,\n",
    "                                text=text,\n",
    "                                score=score,\n",
    "                                attributes={},\n",
    "                            )\n",
    "                        )",
);

/// Results loop using citation files, normalized attributes, and the title as filename.
pub const RESULTS_BLOCK_PATCHED: &str = concat!(
    "                if result and \"document_ids\" in result.metadata:\n",
    "                    sr_citation_files = result.metadata.get(\"citation_files\", {})\n",
    "                    sr_attributes = result.metadata.get(\"search_result_attributes\", [])\n",
    "                    message.results = []\n",
    "                    for i, doc_id in enumerate(result.metadata[\"document_ids\"]):\n",
    "                        text = result.metadata[\"chunks\"][i] if \"chunks\" in result.metadata else None\n",
    "                        score = result.metadata[\"scores\"][i] if \"scores\" in result.metadata else None\n",
    "                        attrs = dict(sr_attributes[i]) if i < len(sr_attributes) else {}\n",
    "                        if \"doc_url\" not in attrs and \"docs_url\" in attrs:\n",
    "                            attrs[\"doc_url\"] = attrs[\"docs_url\"]\n",
    "                        display_name = attrs.get(\"title\") or sr_citation_files.get(doc_id, doc_id)\n",
    "                        message.results.append(\n",
    "                            OpenAIResponseOutputMessageFileSearchToolCallResults(\n",
    "                                file_id=doc_id,\n",
    "                                filename=display_name,\n",
    "                                text=text,\n",
    "                                score=score,\n",
    "                                attributes=attrs,\n",
    "                            )\n",
    "                        )",
);
